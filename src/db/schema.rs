/// The whole schema. Safe to run against an existing database.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    phone TEXT,
    email TEXT,
    address TEXT,
    category TEXT
);
"#;
