use std::any::type_name;

use kube::Resource;

pub fn pretty_type_name<'a, T>() -> &'a str {
    type_name::<T>().split("::").last().unwrap_or_default()
}

pub trait With<F> {
    fn with(self, op: F) -> Self;
}

impl<T, F> With<F> for T
where
    F: FnOnce(&mut Self),
{
    fn with(mut self, op: F) -> Self {
        op(&mut self);

        self
    }
}

pub trait AndIf<F> {
    fn and_if(self, condition: bool, then: F) -> Self;
}

impl<T, F> AndIf<F> for T
where
    F: FnOnce(Self) -> Self,
{
    fn and_if(self, condition: bool, then: F) -> Self {
        let mut obj = self;
        if condition {
            obj = then(obj);
        }

        obj
    }
}

pub trait RequireMetadata<E> {
    fn require_name_or(&self, error: E) -> Result<&str, E>;
    fn require_namespace_or(&self, error: E) -> Result<&str, E>;
}

impl<T: Resource, E> RequireMetadata<E> for T {
    fn require_name_or(&self, error: E) -> Result<&str, E> {
        Ok(self.meta().name.as_ref().ok_or(error)?.as_str())
    }

    fn require_namespace_or(&self, error: E) -> Result<&str, E> {
        Ok(self.meta().namespace.as_ref().ok_or(error)?.as_str())
    }
}
