//! Write a synthetic three-class table for trying out `tabsplit`.
//!
//! Usage: `generate_sample [PATH] [ROWS]` (defaults: `sample_data.csv`, 150).

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Per-class feature centres: (name, [length, width, height]).
const CLASSES: [(&str, [f64; 3]); 3] = [
    ("setosa", [5.0, 3.4, 1.5]),
    ("versicolor", [5.9, 2.8, 4.3]),
    ("virginica", [6.6, 3.0, 5.5]),
];

/// Box-Muller transform for a normal sample.
fn gauss(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(1e-15);
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

/// One row: three measurements around the class centre, then the class name.
fn sample_record(rng: &mut StdRng, i: usize) -> Vec<String> {
    let (name, centre) = CLASSES[i % CLASSES.len()];
    let mut record: Vec<String> = centre
        .iter()
        .map(|&mu| format!("{:.2}", gauss(rng, mu, 0.3)))
        .collect();

    // An occasional unreadable measurement, recovered as 0.0 by the loader.
    if rng.gen_bool(0.02) {
        let at = rng.gen_range(0..record.len());
        record[at] = "n/a".to_string();
    }
    record.push(name.to_string());
    record
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "sample_data.csv".to_string());
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("'{n}' is not a row count"))?,
        None => 150,
    };

    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_path(&path)
        .with_context(|| format!("creating {path}"))?;

    // Spaces in the header exercise name normalization.
    writer.write_record(["length", " width", "height ", "species"])?;

    for i in 0..rows {
        writer.write_record(&sample_record(&mut rng, i))?;
    }
    writer.flush()?;

    println!("Wrote {rows} rows ({} classes) to {path}", CLASSES.len());
    Ok(())
}
