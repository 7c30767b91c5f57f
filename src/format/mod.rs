//! Output formatting for lookup results and wishlist rows (TSV, CSV, JSON).

use crate::amazon::models::{ItemAttributes, WishlistItem};
use crate::config::OutputFormat;

const DELIM: &str = "\t";

/// Formats records for output.
///
/// Wishlist output is produced row by row so it can be written while
/// later pages are still being fetched.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a looked-up item, including the header line for CSV.
    pub fn format_item(&self, item: &ItemAttributes) -> String {
        match self.format {
            OutputFormat::Tsv => self.tsv_item(item),
            OutputFormat::Csv => format!("{}\n{}", Self::item_csv_header(), self.csv_item(item)),
            OutputFormat::Json => {
                serde_json::to_string_pretty(item).unwrap_or_else(|_| "{}".to_string())
            }
        }
    }

    /// Line printed before the first wishlist row, if the format has one.
    pub fn wishlist_header(&self) -> Option<String> {
        match self.format {
            OutputFormat::Csv => Some(Self::wishlist_csv_header().to_string()),
            _ => None,
        }
    }

    /// Formats one wishlist row. JSON rows are single-line objects.
    pub fn format_wishlist_item(&self, item: &WishlistItem) -> String {
        match self.format {
            OutputFormat::Tsv => Self::wishlist_fields(item).join(DELIM),
            OutputFormat::Csv => Self::csv_row(&Self::wishlist_fields(item)),
            OutputFormat::Json => serde_json::to_string(item).unwrap_or_else(|_| "{}".to_string()),
        }
    }

    // TSV formatting

    fn tsv_item(&self, item: &ItemAttributes) -> String {
        [
            item.authors_joined(),
            item.title.clone(),
            item.publisher.clone(),
            format!("{} ed", item.edition),
            item.publication_date.clone(),
            item.binding.clone(),
            format!("{} pages", item.page_count),
            item.isbn.clone(),
            item.ean.clone(),
            item.price.clone(),
            item.price_currency.clone(),
        ]
        .join(DELIM)
    }

    fn wishlist_fields(item: &WishlistItem) -> [&str; 7] {
        [
            item.amazon_id.as_str(),
            item.author.as_str(),
            item.title.as_str(),
            item.binding.as_str(),
            item.currency.as_str(),
            item.price.as_str(),
            item.image_url.as_str(),
        ]
    }

    // CSV formatting

    fn item_csv_header() -> &'static str {
        "authors,title,publisher,edition,publication_date,binding,pages,isbn,ean,price,currency"
    }

    fn wishlist_csv_header() -> &'static str {
        "amazon_id,author,title,binding,currency,price,image_url"
    }

    fn csv_item(&self, item: &ItemAttributes) -> String {
        let authors = item.authors_joined();
        Self::csv_row(&[
            authors.as_str(),
            item.title.as_str(),
            item.publisher.as_str(),
            item.edition.as_str(),
            item.publication_date.as_str(),
            item.binding.as_str(),
            item.page_count.as_str(),
            item.isbn.as_str(),
            item.ean.as_str(),
            item.price.as_str(),
            item.price_currency.as_str(),
        ])
    }

    fn csv_row(fields: &[&str]) -> String {
        fields.iter().map(|f| Self::csv_escape(f)).collect::<Vec<_>>().join(",")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_item() -> ItemAttributes {
        ItemAttributes {
            authors: vec!["Jane Austen".to_string(), "Tony Tanner".to_string()],
            binding: "Paperback".to_string(),
            ean: "9780141439518".to_string(),
            edition: "Reprint".to_string(),
            isbn: "0141439513".to_string(),
            page_count: "480".to_string(),
            publication_date: "2003-04-29".to_string(),
            publisher: "Penguin Classics".to_string(),
            title: "Pride and Prejudice".to_string(),
            price: "599".to_string(),
            price_currency: "GBP".to_string(),
        }
    }

    fn make_wishlist_item() -> WishlistItem {
        WishlistItem {
            amazon_id: "0099549484".to_string(),
            author: "Terry Pratchett".to_string(),
            binding: "Paperback".to_string(),
            title: "Mort: (Discworld Novel 4)".to_string(),
            image_url: "https://images.example/mort.jpg".to_string(),
            currency: "GBP".to_string(),
            price: "7.99".to_string(),
        }
    }

    // TSV format tests

    #[test]
    fn test_tsv_item_column_order() {
        let output = Formatter::new(OutputFormat::Tsv).format_item(&make_item());
        let columns: Vec<&str> = output.split('\t').collect();
        assert_eq!(
            columns,
            vec![
                "Jane Austen, Tony Tanner",
                "Pride and Prejudice",
                "Penguin Classics",
                "Reprint ed",
                "2003-04-29",
                "Paperback",
                "480 pages",
                "0141439513",
                "9780141439518",
                "599",
                "GBP",
            ]
        );
    }

    #[test]
    fn test_tsv_item_empty_fields_keep_suffixes() {
        let item = ItemAttributes { title: "Untitled".to_string(), ..Default::default() };
        let output = Formatter::new(OutputFormat::Tsv).format_item(&item);
        assert_eq!(output, "\tUntitled\t\t ed\t\t\t pages\t\t\t\t");
    }

    #[test]
    fn test_tsv_wishlist_row() {
        let output = Formatter::new(OutputFormat::Tsv).format_wishlist_item(&make_wishlist_item());
        assert_eq!(
            output,
            "0099549484\tTerry Pratchett\tMort: (Discworld Novel 4)\tPaperback\tGBP\t7.99\thttps://images.example/mort.jpg"
        );
        assert!(Formatter::new(OutputFormat::Tsv).wishlist_header().is_none());
    }

    // CSV format tests

    #[test]
    fn test_csv_item_has_header() {
        let output = Formatter::new(OutputFormat::Csv).format_item(&make_item());
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("authors,title,publisher"));
        assert!(lines[1].starts_with("\"Jane Austen, Tony Tanner\",Pride and Prejudice,"));
        assert!(lines[1].ends_with(",599,GBP"));
    }

    #[test]
    fn test_csv_wishlist() {
        let formatter = Formatter::new(OutputFormat::Csv);
        assert_eq!(
            formatter.wishlist_header().unwrap(),
            "amazon_id,author,title,binding,currency,price,image_url"
        );

        let mut item = make_wishlist_item();
        item.title = "Mort, \"Discworld\"".to_string();
        let row = formatter.format_wishlist_item(&item);
        assert!(row.contains("\"Mort, \"\"Discworld\"\"\""));
        assert!(row.starts_with("0099549484,Terry Pratchett,"));
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(Formatter::csv_escape("simple"), "simple");
        assert_eq!(Formatter::csv_escape("with,comma"), "\"with,comma\"");
        assert_eq!(Formatter::csv_escape("with\"quote"), "\"with\"\"quote\"");
        assert_eq!(Formatter::csv_escape("with\nnewline"), "\"with\nnewline\"");
    }

    // JSON format tests

    #[test]
    fn test_json_item() {
        let output = Formatter::new(OutputFormat::Json).format_item(&make_item());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["title"], "Pride and Prejudice");
        assert_eq!(value["authors"][1], "Tony Tanner");
        assert_eq!(value["page_count"], "480");
    }

    #[test]
    fn test_json_wishlist_rows_are_single_line() {
        let formatter = Formatter::new(OutputFormat::Json);
        let row = formatter.format_wishlist_item(&make_wishlist_item());
        assert!(!row.contains('\n'));

        let parsed: WishlistItem = serde_json::from_str(&row).unwrap();
        assert_eq!(parsed, make_wishlist_item());
        assert!(formatter.wishlist_header().is_none());
    }
}
