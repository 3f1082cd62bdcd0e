use std::fmt::Display;

use serde::Serialize;

use crate::cli::OutputFormat;

const COLUMN_SEPARATOR: &str = "   ";

#[derive(Serialize)]
pub struct TableCellOption<T>(Option<T>);

impl<T> From<Option<T>> for TableCellOption<T> {
    fn from(value: Option<T>) -> Self {
        TableCellOption(value)
    }
}

impl<T: Display> Display for TableCellOption<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(value) = &self.0 {
            value.fmt(f)
        } else {
            f.write_str("-")
        }
    }
}

pub trait TableOutputRow {
    fn get_name(&self) -> String;
    fn get_column_names() -> Vec<String>;
    fn get_column_count() -> usize;
    fn get_row(&self) -> Vec<String>;
}

pub trait TableOutputDisplay {
    fn print_names(self);
    fn print_table(self);
    fn print_table_with_headers(self);
}

impl<I: IntoIterator<Item = T>, T: TableOutputRow> TableOutputDisplay for I {
    fn print_names(self) {
        for row in self {
            println!("{}", row.get_name());
        }
    }

    fn print_table(self) {
        let rows = self.into_iter().map(|r| r.get_row()).collect::<Vec<_>>();

        print!("{}", render_table(None, &rows, T::get_column_count()));
    }

    fn print_table_with_headers(self) {
        let rows = self.into_iter().map(|r| r.get_row()).collect::<Vec<_>>();
        let header = T::get_column_names();

        print!(
            "{}",
            render_table(Some(header.as_slice()), &rows, T::get_column_count())
        );
    }
}

/// Left-aligned columns, each as wide as its widest cell.
pub fn render_table(header: Option<&[String]>, rows: &[Vec<String>], columns: usize) -> String {
    let mut widths = vec![0; columns];

    for row in header.into_iter().chain(rows.iter().map(Vec::as_slice)) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();

    for row in header.into_iter().chain(rows.iter().map(Vec::as_slice)) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:width$}"))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR);

        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}

pub trait SerializableOutputDisplay {
    fn print_json(&self) -> Result<(), serde_json::Error>;
    fn print_json_pretty(&self) -> Result<(), serde_json::Error>;
    fn print_yaml(&self) -> Result<(), serde_yaml::Error>;
    fn print_serialized(&self, format: OutputFormat) -> anyhow::Result<bool>;
}

impl<T: ?Sized + Serialize> SerializableOutputDisplay for T {
    fn print_json(&self) -> Result<(), serde_json::Error> {
        let output = serde_json::to_string(self)?;
        println!("{output}");

        Ok(())
    }

    fn print_json_pretty(&self) -> Result<(), serde_json::Error> {
        let output = serde_json::to_string_pretty(self)?;
        println!("{output}");

        Ok(())
    }

    fn print_yaml(&self) -> Result<(), serde_yaml::Error> {
        let output = serde_yaml::to_string(self)?;
        print!("{output}");

        Ok(())
    }

    /// Prints `self` if `format` is a serialization format, returns whether it did.
    fn print_serialized(&self, format: OutputFormat) -> anyhow::Result<bool> {
        match format {
            OutputFormat::Json => self.print_json()?,
            OutputFormat::JsonPretty => self.print_json_pretty()?,
            OutputFormat::Yaml => self.print_yaml()?,
            OutputFormat::Names | OutputFormat::Table | OutputFormat::TableWithHeaders => {
                return Ok(false)
            }
        }

        Ok(true)
    }
}

pub trait CliPrint {
    fn print(self, format: OutputFormat) -> anyhow::Result<()>;
}

impl<T: Serialize + TableOutputDisplay> CliPrint for T {
    fn print(self, format: OutputFormat) -> anyhow::Result<()> {
        match format {
            OutputFormat::Names => self.print_names(),
            OutputFormat::Table => self.print_table(),
            OutputFormat::TableWithHeaders => self.print_table_with_headers(),
            OutputFormat::Json => self.print_json()?,
            OutputFormat::JsonPretty => self.print_json_pretty()?,
            OutputFormat::Yaml => self.print_yaml()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use podnet_macros::TableOutputRow;

    use super::{render_table, TableCellOption, TableOutputRow};

    #[derive(TableOutputRow)]
    struct NetworkRow {
        #[name_column]
        name: &'static str,
        per_node_host_bits: i32,
        ipv6: TableCellOption<&'static str>,
    }

    #[test]
    fn derived_rows_stringify_every_column() {
        let row = NetworkRow {
            name: "default-cidr",
            per_node_host_bits: 8,
            ipv6: None.into(),
        };

        assert_eq!(row.get_name(), "default-cidr");
        assert_eq!(
            NetworkRow::get_column_names(),
            vec!["NAME", "PER NODE HOST BITS", "IPV6"]
        );
        assert_eq!(NetworkRow::get_column_count(), 3);
        assert_eq!(row.get_row(), vec!["default-cidr", "8", "-"]);
    }

    #[test]
    fn columns_are_aligned() {
        let header = vec!["NAME".to_owned(), "READY".to_owned()];
        let rows = vec![
            vec!["macvlan".to_owned(), "True".to_owned()],
            vec!["default".to_owned(), "Unknown".to_owned()],
        ];

        assert_eq!(
            render_table(Some(header.as_slice()), &rows, 2),
            "NAME      READY\n\
             macvlan   True\n\
             default   Unknown\n"
        );
    }

    #[test]
    fn empty_table_without_header_is_empty() {
        assert_eq!(render_table(None, &[], 3), "");
    }
}
