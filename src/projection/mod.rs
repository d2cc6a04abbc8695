//! Forecast projection periods and the sheet loader that produces them

mod period;
pub mod loader;

pub use period::{
    ProjectionPeriod, CAPEX_COLUMN, CHANGE_IN_NWC_COLUMN, DEPRECIATION_COLUMN,
    DISCOUNTED_FCF_COLUMN, EBITDA_COLUMN, FCF_COLUMN, REVENUE_COLUMN, YEAR_COLUMN,
};
pub use loader::{
    load_projection_sheet, load_projection_sheet_from_reader, periods_from_json_rows,
    periods_from_table,
};
