use std::str::FromStr;

use async_trait::async_trait;
use color_eyre::eyre::{Result, eyre};
use rust_decimal::Decimal;
use sqlx::{
    Row, Sqlite, SqlitePool,
    query::Query,
    sqlite::{
        SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
        SqliteSynchronous,
    },
};
use tracing::debug;

use crate::{
    domain::{
        collection::{Collection, Field, FieldKind},
        filter::Domain,
        record::{FieldValue, Record, RecordError},
    },
    store::{DataStore, StoreError},
};

type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

const TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS accounts
        (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            account_number TEXT NOT NULL DEFAULT '',
            account_name   TEXT NOT NULL DEFAULT '',
            balance        TEXT NOT NULL DEFAULT '0',
            status         TEXT NOT NULL DEFAULT 'draft'
        );",
    "CREATE TABLE IF NOT EXISTS transactions
        (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER,
            amount     TEXT NOT NULL DEFAULT '0',
            status     TEXT NOT NULL DEFAULT 'pending'
        );",
    "CREATE TABLE IF NOT EXISTS transfers
        (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            from_account_id INTEGER NOT NULL,
            to_account_id   INTEGER,
            transfer_type   TEXT NOT NULL DEFAULT 'internal',
            amount          TEXT NOT NULL,
            description     TEXT NOT NULL DEFAULT '',
            status          TEXT NOT NULL DEFAULT 'draft',
            CHECK (CAST(amount AS REAL) > 0),
            CHECK (to_account_id IS NULL OR to_account_id <> from_account_id)
        );",
    "CREATE TABLE IF NOT EXISTS loans
        (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            principal TEXT NOT NULL DEFAULT '0',
            status    TEXT NOT NULL DEFAULT 'draft'
        );",
    "CREATE TABLE IF NOT EXISTS fixed_deposits
        (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            deposit_amount TEXT NOT NULL DEFAULT '0',
            status         TEXT NOT NULL DEFAULT 'draft'
        );",
];

/// `DataStore` over a SQLite database. Decimals are kept as TEXT so they
/// come back exactly as written.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .map_err(|e| eyre!("Could not open database {}: {}", database_url, e))?;

        SqliteStore::with_pool(pool).await
    }

    #[cfg(test)]
    pub async fn in_memory() -> Result<Self> {
        // Every connection to :memory: is its own database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        SqliteStore::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self> {
        for table in TABLES {
            sqlx::query(table)
                .execute(&pool)
                .await
                .map_err(|e| eyre!("Failed to initialize tables: {}", e))?;
        }

        Ok(SqliteStore { pool })
    }
}

#[async_trait]
impl DataStore for SqliteStore {
    async fn search_read(
        &self,
        collection: Collection,
        domain: &Domain,
        fields: &[&str],
    ) -> Result<Vec<Record>, StoreError> {
        let fields: Vec<&'static Field> = if fields.is_empty() {
            collection.fields().iter().collect()
        } else {
            fields
                .iter()
                .map(|f| collection.field(f))
                .collect::<Result<_, _>>()?
        };
        let columns: Vec<&str> = fields.iter().map(|f| f.name).collect();

        let sql = format!(
            "SELECT {} FROM {}{} ORDER BY id",
            columns.join(", "),
            collection.table(),
            where_clause(collection, domain)?
        );
        debug!("{}", sql);

        let rows = bind_domain(sqlx::query(&sql), domain)
            .fetch_all(&self.pool)
            .await
            .map_err(query_err)?;

        rows.iter().map(|row| read_row(row, &fields)).collect()
    }

    async fn search_count(
        &self,
        collection: Collection,
        domain: &Domain,
    ) -> Result<u64, StoreError> {
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            collection.table(),
            where_clause(collection, domain)?
        );
        debug!("{}", sql);

        let row = bind_domain(sqlx::query(&sql), domain)
            .fetch_one(&self.pool)
            .await
            .map_err(query_err)?;
        let count: i64 = row.try_get(0).map_err(query_err)?;

        Ok(count.max(0) as u64)
    }

    async fn create(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<Vec<i64>, StoreError> {
        let mut tx = self.pool.begin().await.map_err(write_err)?;
        let mut ids = Vec::with_capacity(records.len());

        for record in &records {
            // Nulls are left out so column defaults apply.
            let values: Vec<(&str, &FieldValue)> =
                record.iter().filter(|(_, v)| **v != FieldValue::Null).collect();
            for (name, value) in &values {
                check_kind(collection.field(name)?, value)?;
            }

            let sql = if values.is_empty() {
                format!("INSERT INTO {} DEFAULT VALUES", collection.table())
            } else {
                format!(
                    "INSERT INTO {} ({}) VALUES ({})",
                    collection.table(),
                    values.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", "),
                    vec!["?"; values.len()].join(", ")
                )
            };
            debug!("{}", sql);

            let query = values
                .iter()
                .fold(sqlx::query(&sql), |q, (_, v)| bind_value(q, v));
            let done = query.execute(&mut *tx).await.map_err(write_err)?;
            ids.push(done.last_insert_rowid());
        }

        tx.commit().await.map_err(write_err)?;
        Ok(ids)
    }
}

fn where_clause(collection: Collection, domain: &Domain) -> Result<String, StoreError> {
    if domain.is_empty() {
        return Ok(String::new());
    }

    let conditions = domain
        .conditions()
        .iter()
        .map(|c| collection.field(c.field()).map(|f| format!("{} = ?", f.name)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(" WHERE {}", conditions.join(" AND ")))
}

fn bind_domain<'q>(query: SqliteQuery<'q>, domain: &Domain) -> SqliteQuery<'q> {
    domain
        .conditions()
        .iter()
        .fold(query, |q, c| bind_value(q, c.value()))
}

fn bind_value<'q>(query: SqliteQuery<'q>, value: &FieldValue) -> SqliteQuery<'q> {
    match value {
        FieldValue::Null => query.bind(None::<String>),
        FieldValue::Integer(i) => query.bind(*i),
        FieldValue::Decimal(d) => query.bind(d.to_string()),
        FieldValue::Text(s) => query.bind(s.clone()),
    }
}

fn read_row(row: &SqliteRow, fields: &[&'static Field]) -> Result<Record, StoreError> {
    let mut record = Record::new();
    for field in fields {
        let value = match field.kind {
            FieldKind::Integer => row
                .try_get::<Option<i64>, _>(field.name)
                .map_err(query_err)?
                .map(FieldValue::Integer),
            FieldKind::Decimal => row
                .try_get::<Option<String>, _>(field.name)
                .map_err(query_err)?
                .map(|raw| {
                    Decimal::from_str(&raw)
                        .map(FieldValue::Decimal)
                        .map_err(|_| RecordError::Unparsable {
                            raw,
                            expected: FieldKind::Decimal,
                        })
                })
                .transpose()?,
            FieldKind::Text => row
                .try_get::<Option<String>, _>(field.name)
                .map_err(query_err)?
                .map(FieldValue::Text),
        };
        record.insert(field.name, value.unwrap_or(FieldValue::Null));
    }

    Ok(record)
}

fn check_kind(field: &Field, value: &FieldValue) -> Result<(), RecordError> {
    match (field.kind, value.kind()) {
        (_, None) => Ok(()),
        (FieldKind::Decimal, Some(FieldKind::Integer)) => Ok(()),
        (expected, Some(actual)) if expected == actual => Ok(()),
        (expected, Some(_)) => Err(RecordError::WrongType {
            field: field.name.to_owned(),
            expected,
        }),
    }
}

fn query_err(e: sqlx::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

fn write_err(e: sqlx::Error) -> StoreError {
    StoreError::Write(e.to_string())
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use crate::{
        domain::{
            collection::{Collection, FieldKind},
            filter::Domain,
            record::{FieldValue, Record, RecordError},
        },
        store::{DataStore, StoreError, sqlite::SqliteStore},
    };

    fn account(number: &str, balance: rust_decimal::Decimal, status: &str) -> Record {
        Record::new()
            .with("account_number", number)
            .with("account_name", format!("Account {}", number))
            .with("balance", balance)
            .with("status", status)
    }

    async fn seeded() -> SqliteStore {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .create(
                Collection::Account,
                vec![
                    account("A1", dec!(500.25), "active"),
                    account("A2", dec!(300.50), "active"),
                    account("A3", dec!(10), "frozen"),
                ],
            )
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn create_returns_ids_in_order() {
        let store = SqliteStore::in_memory().await.unwrap();

        let ids = store
            .create(
                Collection::Loan,
                vec![
                    Record::new().with("status", "active"),
                    Record::new().with("status", "closed"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn search_read_filters_and_projects() {
        let store = seeded().await;

        let records = store
            .search_read(Collection::Account, &Domain::status("active"), &["id", "balance"])
            .await
            .unwrap();

        assert_eq!(
            records,
            vec![
                Record::new().with("id", 1i64).with("balance", dec!(500.25)),
                Record::new().with("id", 2i64).with("balance", dec!(300.50)),
            ]
        );
    }

    #[tokio::test]
    async fn decimals_round_trip_exactly() {
        let store = seeded().await;

        let records = store
            .search_read(
                Collection::Account,
                &Domain::field_eq("account_number", "A2"),
                &["balance"],
            )
            .await
            .unwrap();

        assert_eq!(records[0].get("balance"), Some(&FieldValue::Decimal(dec!(300.50))));
    }

    #[tokio::test]
    async fn counts_with_and_without_filter() {
        let store = seeded().await;

        assert_eq!(store.search_count(Collection::Account, &Domain::all()).await, Ok(3));
        assert_eq!(
            store
                .search_count(Collection::Account, &Domain::status("active").and_eq("id", 2i64))
                .await,
            Ok(1)
        );
        assert_eq!(
            store
                .search_count(Collection::Transfer, &Domain::status("pending"))
                .await,
            Ok(0)
        );
    }

    #[tokio::test]
    async fn unknown_fields_rejected() {
        let store = seeded().await;

        let result = store
            .search_read(Collection::Account, &Domain::field_eq("owner", "me"), &["balance"])
            .await;

        assert_eq!(
            result,
            Err(StoreError::Record(RecordError::UnknownField("bank.account.owner".to_owned())))
        );
    }

    #[tokio::test]
    async fn mistyped_values_rejected() {
        let store = SqliteStore::in_memory().await.unwrap();

        let result = store
            .create(Collection::Account, vec![Record::new().with("balance", "lots")])
            .await;

        assert_eq!(
            result,
            Err(StoreError::Record(RecordError::WrongType {
                field: "balance".to_owned(),
                expected: FieldKind::Decimal
            }))
        );
    }

    #[tokio::test]
    async fn create_is_all_or_nothing() {
        let store = SqliteStore::in_memory().await.unwrap();
        let transfer = |from: i64, to: i64, amount: rust_decimal::Decimal| {
            Record::new()
                .with("from_account_id", from)
                .with("to_account_id", to)
                .with("amount", amount)
        };

        let result = store
            .create(
                Collection::Transfer,
                vec![transfer(1, 2, dec!(10)), transfer(1, 1, dec!(10))],
            )
            .await;

        assert!(matches!(
            result,
            Err(StoreError::Write(msg)) if msg.contains("CHECK constraint failed")
        ));
        assert_eq!(store.search_count(Collection::Transfer, &Domain::all()).await, Ok(0));
    }

    #[tokio::test]
    async fn defaults_fill_omitted_fields() {
        let store = SqliteStore::in_memory().await.unwrap();
        store
            .create(Collection::Account, vec![Record::new().with("status", FieldValue::Null)])
            .await
            .unwrap();

        let records = store
            .search_read(Collection::Account, &Domain::all(), &[])
            .await
            .unwrap();

        assert_eq!(records[0].text("status"), Ok("draft".to_owned()));
        assert_eq!(records[0].decimal("balance"), Ok(dec!(0)));
    }
}
