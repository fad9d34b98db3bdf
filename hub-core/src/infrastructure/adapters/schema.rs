// hub-core/src/infrastructure/adapters/schema.rs

/// Tables read by [`DuckDBStore`](super::duckdb::DuckDBStore).
///
/// The ingestion side owns the real migrations; this mirrors them for local
/// databases and tests.
pub const SCHEMA_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS catalogs (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    "type" VARCHAR NOT NULL
);

CREATE TABLE IF NOT EXISTS resources (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    "type" VARCHAR NOT NULL,
    rating DOUBLE NOT NULL DEFAULT 0,
    catalog_id BIGINT NOT NULL REFERENCES catalogs(id)
);

CREATE TABLE IF NOT EXISTS resource_versions (
    id BIGINT PRIMARY KEY,
    resource_id BIGINT NOT NULL REFERENCES resources(id),
    version VARCHAR NOT NULL,
    description VARCHAR,
    display_name VARCHAR,
    min_pipelines_version VARCHAR,
    url VARCHAR NOT NULL,
    updated_at TIMESTAMP NOT NULL
);

CREATE TABLE IF NOT EXISTS tags (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS resource_tags (
    resource_id BIGINT NOT NULL REFERENCES resources(id),
    tag_id BIGINT NOT NULL REFERENCES tags(id),
    PRIMARY KEY (resource_id, tag_id)
);
"#;
