use once_cell::sync::OnceCell;
use sea_orm::{ConnectionTrait, Database, DatabaseBackend, DatabaseConnection, Statement};

static DB_CONN: OnceCell<DatabaseConnection> = OnceCell::new();

// Номер договора уникален на уровне схемы, включая мягко удалённые
// записи: номер удалённого договора нельзя использовать повторно
const A001_INCOME_CONTRACT_DDL: &str = r#"
    CREATE TABLE a001_income_contract (
        id TEXT PRIMARY KEY NOT NULL,
        contract_number TEXT NOT NULL UNIQUE,
        contract_date TEXT NOT NULL,
        client TEXT NOT NULL,
        contract_amount DECIMAL(15, 2) NOT NULL,
        paid_amount DECIMAL(15, 2),
        status TEXT NOT NULL DEFAULT 'active',
        created_at TEXT,
        updated_at TEXT,
        deleted_at TEXT
    );
"#;

const A002_EXPENSE_CONTRACT_DDL: &str = r#"
    CREATE TABLE a002_expense_contract (
        id TEXT PRIMARY KEY NOT NULL,
        contract_number TEXT NOT NULL UNIQUE,
        type_contract TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        name TEXT NOT NULL,
        client TEXT NOT NULL,
        contract_amount DECIMAL(15, 2) NOT NULL,
        advance_percentage DECIMAL(5, 2),
        payment_loesk DECIMAL(15, 2) DEFAULT 0,
        income_contract_id TEXT NOT NULL,
        status TEXT NOT NULL DEFAULT 'active',
        is_mes INTEGER NOT NULL DEFAULT 0,
        created_at TEXT,
        updated_at TEXT,
        deleted_at TEXT
    );
"#;

/// Открывает SQLite-базу (создавая файл при необходимости) и разворачивает
/// схему: каждая таблица создаётся, только если её ещё нет в sqlite_master.
pub async fn initialize_database(db_path: Option<&str>) -> anyhow::Result<()> {
    let db_file = db_path.unwrap_or("target/db/finance.db");
    if let Some(parent) = std::path::Path::new(db_file).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let absolute_path = if std::path::Path::new(db_file).is_absolute() {
        std::path::PathBuf::from(db_file)
    } else {
        std::env::current_dir()?.join(db_file)
    };
    // Normalize path separators and ensure proper URL form on Windows
    let normalized = absolute_path.to_string_lossy().replace('\\', "/");
    let needs_leading_slash = !normalized.starts_with('/') && normalized.contains(':');
    let prefix = if needs_leading_slash { "/" } else { "" };
    let db_url = format!("sqlite://{}{}?mode=rwc", prefix, normalized);
    let conn = Database::connect(&db_url).await?;

    ensure_table(&conn, "a001_income_contract", A001_INCOME_CONTRACT_DDL).await?;

    ensure_table(&conn, "a002_expense_contract", A002_EXPENSE_CONTRACT_DDL).await?;

    ensure_table(
        &conn,
        "a003_cal_plan",
        r#"
            CREATE TABLE a003_cal_plan (
                id TEXT PRIMARY KEY NOT NULL,
                expense_contract_id TEXT NOT NULL,
                date TEXT NOT NULL,
                amount DECIMAL(10, 2)
            );
        "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a004_cost_item",
        r#"
            CREATE TABLE a004_cost_item (
                id TEXT PRIMARY KEY NOT NULL,
                expense_contract_id TEXT NOT NULL,
                date TEXT NOT NULL,
                counterparty TEXT NOT NULL,
                category TEXT NOT NULL,
                purpose TEXT NOT NULL,
                amount DECIMAL(10, 2) NOT NULL
            );
        "#,
    )
    .await?;

    ensure_table(
        &conn,
        "a005_closed_work",
        r#"
            CREATE TABLE a005_closed_work (
                id TEXT PRIMARY KEY NOT NULL,
                expense_contract_id TEXT NOT NULL,
                act_number TEXT NOT NULL,
                act_date TEXT NOT NULL,
                amount DECIMAL(15, 2) NOT NULL,
                file_name TEXT,
                file_path TEXT,
                created_at TEXT,
                updated_at TEXT
            );
        "#,
    )
    .await?;

    ensure_table(
        &conn,
        "sys_users",
        r#"
            CREATE TABLE sys_users (
                id TEXT PRIMARY KEY NOT NULL,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                full_name TEXT NOT NULL DEFAULT '',
                role TEXT NOT NULL DEFAULT '',
                is_admin INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT,
                updated_at TEXT,
                last_login_at TEXT,
                created_by TEXT
            );
        "#,
    )
    .await?;

    ensure_table(
        &conn,
        "sys_refresh_tokens",
        r#"
            CREATE TABLE sys_refresh_tokens (
                id TEXT PRIMARY KEY NOT NULL,
                user_id TEXT NOT NULL,
                token_hash TEXT NOT NULL,
                expires_at TEXT NOT NULL,
                created_at TEXT,
                revoked_at TEXT
            );
        "#,
    )
    .await?;

    ensure_table(
        &conn,
        "sys_settings",
        r#"
            CREATE TABLE sys_settings (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT
            );
        "#,
    )
    .await?;

    DB_CONN
        .set(conn)
        .map_err(|_| anyhow::anyhow!("Failed to set DB_CONN"))?;
    Ok(())
}

async fn ensure_table(
    conn: &DatabaseConnection,
    table_name: &str,
    create_sql: &str,
) -> anyhow::Result<()> {
    let check_sql = format!(
        "SELECT name FROM sqlite_master WHERE type='table' AND name='{}';",
        table_name
    );
    let existing = conn
        .query_all(Statement::from_string(DatabaseBackend::Sqlite, check_sql))
        .await?;

    if existing.is_empty() {
        tracing::info!("Creating {} table", table_name);
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            create_sql.to_string(),
        ))
        .await?;
    }
    Ok(())
}

pub fn get_connection() -> &'static DatabaseConnection {
    DB_CONN
        .get()
        .expect("Database connection has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn insert_income_contract(
        conn: &DatabaseConnection,
        id: &str,
        number: &str,
        deleted_at: Option<&str>,
    ) -> Result<(), sea_orm::DbErr> {
        conn.execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT INTO a001_income_contract
             (id, contract_number, contract_date, client, contract_amount, deleted_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            [
                id.into(),
                number.into(),
                "2024-01-15".into(),
                "ООО \"Ромашка\"".into(),
                "5000000.00".into(),
                deleted_at.map(str::to_string).into(),
            ],
        ))
        .await
        .map(|_| ())
    }

    #[tokio::test]
    async fn contract_number_is_unique_even_for_soft_deleted_rows() {
        let conn = sea_orm::Database::connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_table(&conn, "a001_income_contract", A001_INCOME_CONTRACT_DDL)
            .await
            .unwrap();

        insert_income_contract(&conn, "id-1", "ДГ-001-24", Some("2024-02-01T00:00:00Z"))
            .await
            .unwrap();

        // Номер мягко удалённого договора занят на уровне схемы
        let duplicate = insert_income_contract(&conn, "id-2", "ДГ-001-24", None).await;
        assert!(duplicate.is_err());

        insert_income_contract(&conn, "id-3", "ДГ-002-24", None)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn expense_contract_number_is_unique() {
        let conn = sea_orm::Database::connect("sqlite::memory:")
            .await
            .unwrap();
        ensure_table(&conn, "a002_expense_contract", A002_EXPENSE_CONTRACT_DDL)
            .await
            .unwrap();

        let insert = |id: &str, number: &str| {
            Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "INSERT INTO a002_expense_contract
                 (id, contract_number, type_contract, start_date, end_date,
                  name, client, contract_amount, income_contract_id)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                [
                    id.into(),
                    number.into(),
                    "ремонтная программа".into(),
                    "2024-01-10".into(),
                    "2024-06-10".into(),
                    "Реконструкция подстанции".into(),
                    "ООО \"Подрядчик\"".into(),
                    "1000000.00".into(),
                    "src-1".into(),
                ],
            )
        };

        conn.execute(insert("id-1", "РД-001-24")).await.unwrap();
        assert!(conn.execute(insert("id-2", "РД-001-24")).await.is_err());
    }
}
