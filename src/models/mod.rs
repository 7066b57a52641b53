pub mod analysis;
pub mod result;

pub use analysis::{
    AnalyzeOperation, AnalyzeResult, AnalyzedDocument, AnalyzedTable, CurrencyValue,
    DocumentField, ServiceError, TableCell,
};
pub use result::{FieldGroup, FieldValue, InvoiceResult, TableDetail};
