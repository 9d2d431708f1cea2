//! Secondary index definitions for the `carts` table.
//!
//! Indexes are plain data here and applied by [`crate::db::ensure_indexes`]
//! rather than being attached to the entity fields.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// Ordered index for equality and range lookups.
    BTree,
    /// Containment index over a JSONB column.
    Gin,
    /// Full-text index over the text extracted by `expression`.
    FullText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub table: &'static str,
    pub kind: IndexKind,
    pub expression: &'static str,
}

impl IndexDef {
    pub fn create_statement(&self) -> String {
        let IndexDef {
            name,
            table,
            kind,
            expression,
        } = self;
        match kind {
            IndexKind::BTree => {
                format!("CREATE INDEX IF NOT EXISTS {name} ON {table} ({expression})")
            }
            IndexKind::Gin => {
                format!("CREATE INDEX IF NOT EXISTS {name} ON {table} USING GIN ({expression})")
            }
            IndexKind::FullText => format!(
                "CREATE INDEX IF NOT EXISTS {name} ON {table} USING GIN (to_tsvector('simple', {expression}))"
            ),
        }
    }
}

const fn btree(name: &'static str, column: &'static str) -> IndexDef {
    IndexDef {
        name,
        table: "carts",
        kind: IndexKind::BTree,
        expression: column,
    }
}

pub const CART_INDEXES: &[IndexDef] = &[
    btree("carts_user_id_idx", "user_id"),
    btree("carts_session_id_idx", "session_id"),
    IndexDef {
        name: "carts_products_idx",
        table: "carts",
        kind: IndexKind::Gin,
        expression: "products",
    },
    btree("carts_total_idx", "total"),
    btree("carts_total_products_idx", "total_products"),
    btree("carts_total_quantity_idx", "total_quantity"),
    IndexDef {
        name: "carts_product_description_fts_idx",
        table: "carts",
        kind: IndexKind::FullText,
        expression: "jsonb_path_query_array(products, '$[*].description')",
    },
];
