use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use rand::seq::IndexedRandom;
use rand::Rng;

const PROBABILITY_INCOME: f64 = 0.3;

const INCOME_CATEGORIES: &[(&str, &str)] = &[
    ("salary", "Monthly salary"),
    ("freelance", "Freelance project"),
    ("investment", "Investment returns"),
    ("bonus", "Performance bonus"),
];

const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("food", "Groceries"),
    ("food", "Restaurant"),
    ("transport", "Gas"),
    ("transport", "Public transport"),
    ("utilities", "Electricity bill"),
    ("utilities", "Internet bill"),
    ("entertainment", "Movie tickets"),
    ("entertainment", "Streaming service"),
    ("shopping", "Clothing"),
    ("shopping", "Electronics"),
    ("healthcare", "Doctor visit"),
    ("healthcare", "Pharmacy"),
];

const ACCOUNTS: &[&str] = &["checking", "savings", "credit_card"];
const LOCATIONS: &[&str] = &["Online", "New York", "Los Angeles", "Chicago", "Houston"];

struct GeneratorConfig {
    num_records: usize,
    date: NaiveDate,
    root: String,
    bucket: String,
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(75);
        let date = args.get(2)
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Local::now().date_naive());

        Self {
            num_records,
            date,
            root: args.get(3).cloned().unwrap_or_else(|| "samples".to_string()),
            bucket: args.get(4).cloned().unwrap_or_else(|| "portfolio-etl-bucket".to_string()),
        }
    }

    fn key(&self) -> String {
        format!(
            "raw-data/year={}/month={}/day={}/transactions-{}.csv",
            self.date.format("%Y"),
            self.date.format("%m"),
            self.date.format("%d"),
            self.date.format("%Y%m%d")
        )
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();
    let key = config.key();
    let output_path = Path::new(&config.root).join(&config.bucket).join(&key);

    println!("Generating {} transactions for {} in {}...", config.num_records, config.date, output_path.display());

    if let Some(parent) = output_path.parent() {
        create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(&output_path)?);
    writeln!(writer, "transaction_id,date,timestamp,amount,category,description,transaction_type,account,location")?;

    let mut rng = rand::rng();
    let midnight = config.date.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN);

    for index in 1..=config.num_records {
        let is_income = rng.random_bool(PROBABILITY_INCOME);

        let (categories, cents) = if is_income {
            (INCOME_CATEGORIES, rng.random_range(50_000..=500_000i64))
        } else {
            (EXPENSE_CATEGORIES, -rng.random_range(1_000..=50_000i64))
        };

        let (category, description) = categories.choose(&mut rng).copied().unwrap_or(("other", "Other"));
        let time = midnight + Duration::hours(rng.random_range(6..=22)) + Duration::minutes(rng.random_range(0..=59));

        writeln!(
            writer,
            "TXN_{}_{:04},{},{},{}{}.{:02},{},{},{},{},{}",
            config.date.format("%Y%m%d"),
            index,
            time.format("%Y-%m-%d"),
            time.format("%Y-%m-%d %H:%M:%S"),
            if cents < 0 { "-" } else { "" },
            cents.abs() / 100,
            cents.abs() % 100,
            category,
            description,
            if is_income { "income" } else { "expense" },
            ACCOUNTS.choose(&mut rng).copied().unwrap_or("checking"),
            LOCATIONS.choose(&mut rng).copied().unwrap_or("Online")
        )?;
    }

    writer.flush()?;

    let event_path = Path::new(&config.root).join(format!("event-{}.json", config.date.format("%Y%m%d")));
    let event = format!(
        r#"{{"Records":[{{"s3":{{"bucket":{{"name":"{}"}},"object":{{"key":"{}"}}}}}}]}}"#,
        config.bucket, key
    );

    std::fs::write(&event_path, event + "\n")?;

    println!("Wrote trigger event to {}", event_path.display());
    println!("Run: cargo run -- {} {}", config.root, event_path.display());

    Ok(())
}
