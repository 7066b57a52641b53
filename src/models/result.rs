use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// 单个抽取值: 文本 + 置信度 (内部以百分数保存, 输出渲染为 "NN.NN%")
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValue {
    #[serde(rename = "Value")]
    pub value: String,
    #[serde(rename = "Confidence", serialize_with = "serialize_percent")]
    pub confidence: f64,
}

impl FieldValue {
    pub fn new(value: impl Into<String>, confidence: f64) -> Self {
        Self {
            value: value.into(),
            confidence,
        }
    }
}

/// 字段分组: 规范字段名 -> 抽取值序列 (保序, 按值去重)
pub type FieldGroup = IndexMap<&'static str, Vec<FieldValue>>;

/// 扁平化后的表格
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableDetail {
    #[serde(rename = "Table")]
    pub table: Vec<Vec<String>>,
}

/// 抽取结果聚合: 五个字段分组 + 表格明细
///
/// 五个分组永远在响应中出现, 即使为空; ProductDetails 每个识别文档一条记录。
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceResult {
    #[serde(rename = "InvoiceFields")]
    pub invoice_fields: FieldGroup,
    #[serde(rename = "ProductDetails")]
    pub product_details: Vec<FieldGroup>,
    #[serde(rename = "AmountDetails")]
    pub amount_details: FieldGroup,
    #[serde(rename = "ClientInformation")]
    pub client_information: FieldGroup,
    #[serde(rename = "PaymentDetails")]
    pub payment_details: FieldGroup,
    #[serde(rename = "TableDetails")]
    pub table_details: Vec<TableDetail>,
}

/// 置信度渲染为两位小数百分比字符串
fn serialize_percent<S>(confidence: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{:.2}%", confidence))
}
