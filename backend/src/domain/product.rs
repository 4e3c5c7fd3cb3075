//! Shared product catalogue.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ProductId;
use super::validation::{FieldError, required_text};

/// Catalogue product.
///
/// ## Invariants
/// - `precio` is never negative.
/// - `existencia` is never negative; the unsigned type enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Record identifier.
    #[schema(value_type = String)]
    pub id: ProductId,
    /// Display name, matched by search.
    #[schema(example = "Monitor 24\"")]
    pub nombre: String,
    /// Unit price.
    #[schema(value_type = f64, example = 199.99)]
    pub precio: Decimal,
    /// Units in stock.
    #[schema(example = 12)]
    pub existencia: u32,
    /// Creation time.
    pub creado: DateTime<Utc>,
}

impl Product {
    /// Merge a validated patch into this record.
    pub fn apply(&mut self, patch: &ProductPatch) {
        if let Some(nombre) = &patch.nombre {
            self.nombre.clone_from(nombre);
        }
        if let Some(precio) = patch.precio {
            self.precio = precio;
        }
        if let Some(existencia) = patch.existencia {
            self.existencia = existencia;
        }
    }

    /// Whole-word, case-insensitive match of `texto` against the name.
    ///
    /// Every word of `texto` must appear as a word of the name.
    ///
    /// ```
    /// use chrono::Utc;
    /// use crm_backend::domain::{NewProduct, ProductId};
    /// use rust_decimal::Decimal;
    ///
    /// let product = NewProduct::try_from_parts("Monitor Curvo", Decimal::ONE, 1)
    ///     .unwrap()
    ///     .into_product(ProductId::random(), Utc::now());
    /// assert!(product.matches_words("monitor"));
    /// assert!(!product.matches_words("moni"));
    /// ```
    #[must_use]
    pub fn matches_words(&self, texto: &str) -> bool {
        let words: Vec<String> = split_words(&self.nombre).collect();
        let mut wanted = split_words(texto).peekable();
        if wanted.peek().is_none() {
            return false;
        }
        wanted.all(|term| words.contains(&term))
    }
}

fn split_words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

fn non_negative_price(precio: Decimal) -> Result<Decimal, FieldError> {
    if precio.is_sign_negative() && !precio.is_zero() {
        return Err(FieldError::Negative { field: "precio" });
    }
    Ok(precio)
}

fn stock_count(existencia: i64) -> Result<u32, FieldError> {
    if existencia < 0 {
        return Err(FieldError::Negative {
            field: "existencia",
        });
    }
    // Stored as a PostgreSQL INTEGER.
    let max = i64::from(i32::MAX);
    if existencia > max {
        return Err(FieldError::OutOfRange {
            field: "existencia",
            min: 0,
            max,
        });
    }
    u32::try_from(existencia).map_err(|_| FieldError::OutOfRange {
        field: "existencia",
        min: 0,
        max,
    })
}

/// Validated input for `nuevoProducto`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    /// Display name.
    pub nombre: String,
    /// Unit price.
    pub precio: Decimal,
    /// Initial stock.
    pub existencia: u32,
}

impl NewProduct {
    /// Validate raw product fields.
    pub fn try_from_parts(nombre: &str, precio: Decimal, existencia: i64) -> Result<Self, FieldError> {
        Ok(Self {
            nombre: required_text("nombre", nombre)?,
            precio: non_negative_price(precio)?,
            existencia: stock_count(existencia)?,
        })
    }

    /// Give the validated input its identity.
    #[must_use]
    pub fn into_product(self, id: ProductId, creado: DateTime<Utc>) -> Product {
        Product {
            id,
            nombre: self.nombre,
            precio: self.precio,
            existencia: self.existencia,
            creado,
        }
    }
}

/// Partial update for `actualizarProducto`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    /// New name.
    pub nombre: Option<String>,
    /// New unit price.
    pub precio: Option<Decimal>,
    /// Stock count to set.
    pub existencia: Option<u32>,
}

impl ProductPatch {
    /// Validate the fields that are present.
    pub fn try_from_parts(
        nombre: Option<&str>,
        precio: Option<Decimal>,
        existencia: Option<i64>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            nombre: nombre.map(|v| required_text("nombre", v)).transpose()?,
            precio: precio.map(non_negative_price).transpose()?,
            existencia: existencia.map(stock_count).transpose()?,
        })
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nombre.is_none() && self.precio.is_none() && self.existencia.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use rust_decimal_macros::dec;

    #[fixture]
    fn monitor() -> Product {
        NewProduct::try_from_parts("Monitor Curvo 27", dec!(250.50), 5)
            .expect("valid product")
            .into_product(ProductId::random(), Utc::now())
    }

    #[rstest]
    #[case("", dec!(1), 1, FieldError::Required { field: "nombre" })]
    #[case("Teclado", dec!(-0.01), 1, FieldError::Negative { field: "precio" })]
    #[case("Teclado", dec!(1), -1, FieldError::Negative { field: "existencia" })]
    #[case(
        "Teclado",
        dec!(1),
        i64::from(i32::MAX) + 1,
        FieldError::OutOfRange { field: "existencia", min: 0, max: i64::from(i32::MAX) }
    )]
    fn new_product_rejects_invalid_fields(
        #[case] nombre: &str,
        #[case] precio: Decimal,
        #[case] existencia: i64,
        #[case] expected: FieldError,
    ) {
        let err = NewProduct::try_from_parts(nombre, precio, existencia).expect_err("invalid");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn zero_price_and_stock_are_accepted() {
        let product = NewProduct::try_from_parts("Muestra", Decimal::ZERO, 0).expect("valid");
        assert_eq!(product.existencia, 0);
    }

    #[rstest]
    #[case("monitor", true)]
    #[case("CURVO monitor", true)]
    #[case("27", true)]
    #[case("moni", false)]
    #[case("monitor plano", false)]
    #[case("   ", false)]
    fn matches_whole_words(monitor: Product, #[case] texto: &str, #[case] expected: bool) {
        assert_eq!(monitor.matches_words(texto), expected);
    }

    #[rstest]
    fn apply_overwrites_present_fields(monitor: Product) {
        let mut updated = monitor.clone();
        updated.apply(&ProductPatch::try_from_parts(None, Some(dec!(199)), Some(9)).expect("patch"));
        assert_eq!(updated.precio, dec!(199));
        assert_eq!(updated.existencia, 9);
        assert_eq!(updated.nombre, monitor.nombre);
    }

    #[rstest]
    fn default_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch::try_from_parts(Some("Otro"), None, None)
            .expect("patch")
            .is_empty());
    }
}
