// Adapters layer: decoding of external file formats into domain types.

pub mod spreadsheet;
