use serde::{Deserialize, Serialize};

use super::RowMapper;
use crate::normalize::{Tristate, format_price, parse_boolish, pick_num, pick_str, slugify};
use crate::record::Record;

pub const API_HEADERS: [&str; 14] = [
    "sku",
    "name",
    "description",
    "regular_price",
    "sale_price",
    "special_price",
    "category_slug",
    "image_url",
    "video_url",
    "weight",
    "dimension_length",
    "dimension_width",
    "dimension_height",
    "is_active",
];

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

/// Candidate source fields for each API column, most preferred first.
///
/// Field lookups ignore case and punctuation, so `STCODIGO` also matches `stcodigo`.
/// `sale_price` has no source column in the stock table and defaults to no candidates.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiFieldMap {
    pub sku: Vec<String>,
    pub name: Vec<String>,
    pub description: Vec<String>,
    pub regular_price: Vec<String>,
    pub sale_price: Vec<String>,
    pub special_price: Vec<String>,
    pub family_name: Vec<String>,
    pub family_code: Vec<String>,
    pub deleted: Vec<String>,
}

impl Default for ApiFieldMap {
    fn default() -> Self {
        Self {
            sku: names(&["STCODIGO", "CODIGO", "COD", "SKU", "PRODUCT_CODE"]),
            name: names(&["STDESCRIP", "DESCRIP", "DESCRIPCION", "NOMBRE", "NAME", "PRODUCT_NAME"]),
            description: names(&["STDETALLE", "DETALLE", "STDESCRIP", "DESCRIPCION_LARGA", "DESCRIPTION"]),
            regular_price: names(&[
                "STPRECUNI2",
                "PRECUNI2",
                "PRECIO",
                "PRECIO_VENTA",
                "PRICE",
                "REGULAR_PRICE",
                "STPRECIO",
                "PRECIOVTA",
            ]),
            sale_price: Vec::new(),
            special_price: names(&["STPRECUNI1", "PRECUNI1", "COSTO", "COST", "PRECIO_ESPECIAL"]),
            family_name: names(&["STNOMFAM", "NOMFAM", "FAMILIA_NOMBRE", "CATEGORY_NAME", "CATEGORIA"]),
            family_code: names(&["STFAMILIA", "FAMILIA", "CATEGORY", "CAT"]),
            deleted: names(&["STBORRAR", "BORRAR", "DELETED"]),
        }
    }
}

/// Maps stock records onto the fixed product-import columns.
#[derive(Debug, Clone, Default)]
pub struct ApiMapper {
    fields: ApiFieldMap,
}

impl ApiMapper {
    #[must_use]
    pub fn new(fields: ApiFieldMap) -> Self {
        Self { fields }
    }

    /// First deleted-flag candidate that parses to a known value.
    fn deleted_flag(&self, rec: &Record) -> Tristate {
        self.fields
            .deleted
            .iter()
            .map(|f| parse_boolish(rec.get(f)))
            .find(|t| t.is_known())
            .unwrap_or(Tristate::Unknown)
    }
}

/// `candidate` only when it is a real discount on `regular`.
fn discounted(candidate: Option<f64>, regular: Option<f64>) -> String {
    match (candidate, regular) {
        (Some(c), Some(r)) if c > 0.0 && c < r => format_price(Some(c)),
        _ => String::new(),
    }
}

impl RowMapper for ApiMapper {
    fn header(&self) -> Vec<String> {
        names(&API_HEADERS)
    }

    fn map_record(&self, rec: &Record) -> Vec<String> {
        let f = &self.fields;
        let sku = pick_str(rec, &f.sku);
        let name = pick_str(rec, &f.name);
        let mut description = pick_str(rec, &f.description);
        if description.is_empty() {
            description.clone_from(&name);
        }

        let regular = pick_num(rec, &f.regular_price);
        let sale_price = discounted(pick_num(rec, &f.sale_price), regular);
        let special_price = discounted(pick_num(rec, &f.special_price), regular);

        let mut category_slug = slugify(&pick_str(rec, &f.family_name));
        if category_slug.is_empty() {
            category_slug = slugify(&pick_str(rec, &f.family_code));
        }

        let is_active = !matches!(self.deleted_flag(rec), Tristate::True);

        vec![
            sku,
            name,
            description,
            format_price(regular),
            sale_price,
            special_price,
            category_slug,
            String::new(), // image_url
            String::new(), // video_url
            String::new(), // weight
            String::new(), // dimension_length
            String::new(), // dimension_width
            String::new(), // dimension_height
            is_active.to_string(),
        ]
    }
}
