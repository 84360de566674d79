use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder};
use tracing::debug;

use crate::sink::{Sink, SinkError, SinkLoad, SinkSettings};

//NOTE: 17 bound columns per row keeps a chunk well below the 65535 bind parameter limit
const DEFAULT_CHUNK_SIZE: usize = 1_000;

const COLUMNS: &str = "transaction_id, date, timestamp, amount, amount_abs, amount_category, category, description, \
    transaction_type, account, location, day_of_week, month, year, processed_timestamp, processed_by, source_file";

/// Loads batches into a PostgreSQL-compatible warehouse table, upserting on `transaction_id`.
pub struct PostgresSink {
    chunk_size: usize
}

impl PostgresSink {
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE
        }
    }

    fn create_table_statement(table: &str) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                transaction_id VARCHAR(50) PRIMARY KEY,
                date DATE,
                timestamp TIMESTAMP,
                amount DECIMAL(18,4),
                amount_abs DECIMAL(18,4),
                amount_category VARCHAR(20),
                category VARCHAR(50),
                description VARCHAR(200),
                transaction_type VARCHAR(20),
                account VARCHAR(50),
                location VARCHAR(100),
                day_of_week VARCHAR(20),
                month INTEGER,
                year INTEGER,
                processed_timestamp TIMESTAMP,
                processed_by VARCHAR(50),
                source_file VARCHAR(500)
            )"
        )
    }
}

impl Default for PostgresSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for PostgresSink {
    async fn load(&self, settings: &SinkSettings, load: SinkLoad<'_>) -> Result<u64, SinkError> {
        let options = PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .database(&settings.database)
            .username(&settings.user)
            .password(&settings.password);

        let mut connection = PgConnection::connect_with(&options).await?;
        let mut transaction = connection.begin().await?;

        sqlx::query(&Self::create_table_statement(&settings.table))
            .execute(&mut *transaction)
            .await?;

        debug!("Table [{}] created/verified", settings.table);

        let processed_timestamp = load.processed_at.naive_utc();
        let mut rows_written = 0;

        for chunk in load.records.chunks(self.chunk_size.max(1)) {
            let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!("INSERT INTO {} ({COLUMNS}) ", settings.table));

            builder.push_values(chunk, |mut row, record| {
                let transaction = &record.transaction;

                row.push_bind(transaction.transaction_id.clone())
                    .push_bind(transaction.date)
                    .push_bind(transaction.timestamp)
                    .push_bind(transaction.amount)
                    .push_bind(record.amount_abs)
                    .push_bind(record.amount_category.as_str())
                    .push_bind(transaction.category.clone())
                    .push_bind(transaction.description.clone())
                    .push_bind(transaction.transaction_type.as_ref().map(|kind| kind.as_str().to_string()))
                    .push_bind(transaction.account.clone())
                    .push_bind(transaction.location.clone())
                    .push_bind(record.day_of_week.clone())
                    .push_bind(record.month as i32)
                    .push_bind(record.year)
                    .push_bind(processed_timestamp)
                    .push_bind(load.processed_by.to_string())
                    .push_bind(load.source_file.to_string());
            });

            builder.push(
                " ON CONFLICT (transaction_id) DO UPDATE SET \
                amount = EXCLUDED.amount, \
                amount_abs = EXCLUDED.amount_abs, \
                amount_category = EXCLUDED.amount_category, \
                processed_timestamp = EXCLUDED.processed_timestamp"
            );

            let result = builder.build().execute(&mut *transaction).await?;
            rows_written += result.rows_affected();
            debug!("Inserted chunk of {} rows into [{}]", chunk.len(), settings.table);
        }

        transaction.commit().await?;
        connection.close().await?;

        Ok(rows_written)
    }
}
