const SCHEMA: &str = r#"
CREATE EXTENSION IF NOT EXISTS vector;

CREATE TABLE IF NOT EXISTS businesses (
	business_id uuid PRIMARY KEY,
	name text NOT NULL,
	category text NOT NULL DEFAULT '',
	description text NOT NULL DEFAULT '',
	address text NOT NULL DEFAULT '',
	latitude double precision,
	longitude double precision,
	rating real,
	image_url text,
	tags jsonb NOT NULL DEFAULT '[]'::jsonb,
	created_at timestamptz NOT NULL DEFAULT now(),
	updated_at timestamptz NOT NULL DEFAULT now()
);

CREATE TABLE IF NOT EXISTS business_embeddings (
	business_id uuid PRIMARY KEY REFERENCES businesses (business_id) ON DELETE CASCADE,
	embedding_version text NOT NULL,
	vec vector(<VECTOR_DIM>) NOT NULL,
	created_at timestamptz NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS business_embeddings_vec_idx
	ON business_embeddings USING hnsw (vec vector_cosine_ops);

CREATE TABLE IF NOT EXISTS reviews (
	review_id uuid PRIMARY KEY,
	business_id uuid NOT NULL REFERENCES businesses (business_id) ON DELETE CASCADE,
	author text NOT NULL DEFAULT '',
	rating real,
	body text NOT NULL DEFAULT '',
	created_at timestamptz NOT NULL DEFAULT now()
);

CREATE INDEX IF NOT EXISTS reviews_business_id_idx ON reviews (business_id);
"#;

pub fn render_schema(vector_dim: u32) -> String {
	SCHEMA.replace("<VECTOR_DIM>", &vector_dim.to_string())
}
