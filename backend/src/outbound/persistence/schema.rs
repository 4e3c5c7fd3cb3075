//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Sellers able to sign in.
    usuarios (id) {
        id -> Uuid,
        nombre -> Varchar,
        apellido -> Varchar,
        /// Lower-cased; unique.
        email -> Varchar,
        /// Argon2 PHC string.
        password -> Varchar,
        creado -> Timestamptz,
    }
}

diesel::table! {
    clientes (id) {
        id -> Uuid,
        nombre -> Varchar,
        apellido -> Varchar,
        empresa -> Varchar,
        email -> Varchar,
        telefono -> Nullable<Varchar>,
        vendedor -> Uuid,
        creado -> Timestamptz,
    }
}

diesel::table! {
    productos (id) {
        id -> Uuid,
        nombre -> Varchar,
        /// Never negative; enforced by a check constraint.
        existencia -> Int4,
        precio -> Numeric,
        creado -> Timestamptz,
    }
}

diesel::table! {
    /// Orders. `pedido` holds the priced line items as a JSON array.
    pedidos (id) {
        id -> Uuid,
        pedido -> Jsonb,
        total -> Numeric,
        cliente -> Uuid,
        vendedor -> Uuid,
        estado -> Varchar,
        creado -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(usuarios, clientes, productos, pedidos);
