//! Terminal rendering for the catalog, favorites and match summary.

use pawmatch_core::catalog::{CatalogEvent, CatalogView, FetchStage};
use pawmatch_core::DogRecord;

const HEADER: [&str; 5] = ["ID", "NAME", "BREED", "AGE", "ZIP"];

/// Column widths that fit every row
fn widths(dogs: &[&DogRecord]) -> [usize; 5] {
    let mut widths = HEADER.map(str::len);
    for dog in dogs {
        let cells = cells(dog);
        for (width, cell) in widths.iter_mut().zip(cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn cells(dog: &DogRecord) -> [String; 5] {
    [
        dog.id.clone(),
        dog.name.clone(),
        dog.breed.clone(),
        dog.age.to_string(),
        dog.zip_code.clone(),
    ]
}

fn row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Render dogs as an aligned table, in the order given
pub fn table(dogs: &[&DogRecord]) -> String {
    let widths = widths(dogs);
    let mut lines = vec![row(&HEADER.map(String::from), &widths)];
    lines.extend(dogs.iter().map(|dog| row(&cells(dog), &widths)));
    lines.join("\n")
}

pub fn print_catalog(view: &CatalogView<'_>) {
    match view.stage {
        FetchStage::Failed => {
            eprintln!("❌ Error: {}", view.error.unwrap_or("catalog failed to load"));
            return;
        }
        FetchStage::Ready => {}
        _ => {
            println!("⏳ Loading dogs...");
            return;
        }
    }

    let dogs: Vec<&DogRecord> = view.dogs.iter().collect();
    println!("🐶 Available Dogs ({})", dogs.len());
    println!("{}", table(&dogs));
}

pub fn print_favorites(view: &CatalogView<'_>) {
    println!("\n⭐ Favorites ({})", view.favorites.len());
    if view.favorites.is_empty() {
        println!("   (none)");
    } else {
        println!("{}", table(&view.favorites));
    }
}

pub fn print_match(view: &CatalogView<'_>) {
    match view.matched {
        Some(dog) => {
            println!("\n💘 Your match: {} the {} ({} years, {})", dog.name, dog.breed, dog.age, dog.zip_code);
            println!("   {}", dog.img);
        }
        None => println!("\n💔 No match yet"),
    }
    if let Some(error) = view.error {
        eprintln!("❌ Error: {}", error);
    }
}

pub fn print_timeline(events: &[CatalogEvent]) {
    println!("\n🕒 Timeline");
    for event in events {
        let data = event
            .data
            .as_ref()
            .map(|d| d.to_string())
            .unwrap_or_default();
        println!(
            "   {}  {:<18} {}",
            event.timestamp.format("%H:%M:%S%.3f"),
            serde_json::to_value(event.kind)
                .ok()
                .and_then(|v| v.as_str().map(String::from))
                .unwrap_or_default(),
            data
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str, name: &str, breed: &str) -> DogRecord {
        DogRecord {
            id: id.to_string(),
            img: String::new(),
            name: name.to_string(),
            age: 3,
            zip_code: "02139".to_string(),
            breed: breed.to_string(),
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        let a = dog("a1", "Max", "Golden Retriever");
        let b = dog("b2", "Bella", "Pug");
        let rendered = table(&[&a, &b]);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID  NAME   BREED"));
        assert!(lines[1].contains("Max    Golden Retriever  3    02139"));
        assert!(lines[2].starts_with("b2  Bella  Pug"));
    }

    #[test]
    fn test_table_keeps_given_order() {
        let z = dog("z", "Zed", "Boxer");
        let a = dog("a", "Ace", "Boxer");
        let rendered = table(&[&z, &a]);
        let zed = rendered.find("Zed").unwrap();
        let ace = rendered.find("Ace").unwrap();
        assert!(zed < ace);
    }
}
