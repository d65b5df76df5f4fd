use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::database::models::Movie;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&json!({ "success": true, "message": message }))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

pub fn output_movies(output_format: OutputFormat, movies: &[Movie]) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(movies)?),
        OutputFormat::Text if movies.is_empty() => println!("No movies found"),
        OutputFormat::Text => print!("{}", format_table(movies)),
    }
    Ok(())
}

pub fn output_movie(output_format: OutputFormat, movie: &Movie) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(movie)?),
        OutputFormat::Text => {
            println!("ID:          {}", movie.id);
            println!("Name:        {}", movie.name);
            println!("Description: {}", movie.description.as_deref().unwrap_or("-"));
            println!("Price:       {:.2}", movie.price);
            println!("In stock:    {}", movie.inventory_quantity);
            println!("Image:       {}", movie.image.as_deref().unwrap_or("-"));
        }
    }
    Ok(())
}

pub fn output_value(output_format: OutputFormat, value: &Value) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => {
            if let Some(map) = value.as_object() {
                for (key, v) in map {
                    match v.as_str() {
                        Some(s) => println!("{}: {}", key, s),
                        None => println!("{}: {}", key, v),
                    }
                }
            } else {
                println!("{}", value);
            }
        }
    }
    Ok(())
}

/// Fixed-width table of id, name, price and stock
pub fn format_table(movies: &[Movie]) -> String {
    let mut out = format!("{:>6}  {:<32}  {:>10}  {:>8}\n", "ID", "NAME", "PRICE", "STOCK");
    for movie in movies {
        out.push_str(&format!(
            "{:>6}  {:<32}  {:>10.2}  {:>8}\n",
            movie.id,
            truncate(&movie.name, 32),
            movie.price,
            movie.inventory_quantity
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max - 1).collect();
        t.push('…');
        t
    }
}
