//! Column-name mapping for the vendor workbook.
//!
//! Sheet and header names are fixed by the export format. Header lookup is
//! case-insensitive on trimmed names (see [`crate::RawRow`]), so the casing
//! here is documentation as much as it is data.

/// Worksheet holding hardware renewal rows.
pub const SHEET_HARDWARE: &str = "Hardware";
/// Worksheet holding software renewal rows.
pub const SHEET_SOFTWARE: &str = "Software";

/// Columns present on both sheets.
pub const CUSTOMER_NAME: &str = "Customer Name";
pub const COUNTRY: &str = "Country";
pub const ARCHITECTURE: &str = "Architecture";
pub const SUB_ARCHITECTURE: &str = "Sub Architecture";
pub const QUANTITY: &str = "Quantity";
pub const OPPORTUNITY: &str = "Renewal Opportunity";

/// Columns specific to the hardware sheet.
pub mod hardware {
    pub const PRODUCT_ID: &str = "Product ID";
    pub const PRODUCT_DESCRIPTION: &str = "Product Description";
    /// Last date of support for the installed product.
    pub const LDOS_DATE: &str = "LDOS Date";
}

/// Columns specific to the software sheet.
pub mod software {
    pub const OFFER_ID: &str = "Offer ID";
    pub const OFFER_DESCRIPTION: &str = "Offer Description";
    pub const LIST_PRICE: &str = "Full Term List Price";
    pub const END_DATE: &str = "Contract End Date";
}
