use crate::models::{AnalyzedDocument, DocumentField, FieldGroup, FieldValue, InvoiceResult};
use chrono::NaiveDate;

/// 输出分组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldBucket {
    InvoiceFields,
    Amounts,
    ClientInfo,
    PaymentDetails,
    ProductDetails,
}

/// 规范字段: 内部字段名 + 同义词列表 (按优先级排列) + 所属分组
#[derive(Debug)]
pub struct CanonicalField {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub bucket: FieldBucket,
}

/// 字段同义词表, 进程级常量
///
/// 同一规范字段可能以多种标签出现在识别结果里, 按声明顺序逐个尝试。
pub const FIELD_SYNONYMS: &[CanonicalField] = &[
    // 发票基础字段
    CanonicalField {
        name: "InvoiceId",
        aliases: &["InvoiceId", "Invoice Number", "Invoice No", "Invoice #", "InvoiceNo"],
        bucket: FieldBucket::InvoiceFields,
    },
    CanonicalField {
        name: "InvoiceDate",
        aliases: &["InvoiceDate", "Invoice Date", "Date"],
        bucket: FieldBucket::InvoiceFields,
    },
    CanonicalField {
        name: "DueDate",
        aliases: &["DueDate", "Due Date", "Payment Due Date"],
        bucket: FieldBucket::InvoiceFields,
    },
    CanonicalField {
        name: "VendorName",
        aliases: &["VendorName", "Vendor Name", "Supplier", "Seller"],
        bucket: FieldBucket::InvoiceFields,
    },
    CanonicalField {
        name: "VendorAddress",
        aliases: &["VendorAddress", "Vendor Address"],
        bucket: FieldBucket::InvoiceFields,
    },
    // 金额字段
    CanonicalField {
        name: "InvoiceTotal",
        aliases: &["InvoiceTotal", "Amount", "Total", "Total Amount", "Balance Due"],
        bucket: FieldBucket::Amounts,
    },
    CanonicalField {
        name: "SubTotal",
        aliases: &["SubTotal", "Sub Total", "Net Amount"],
        bucket: FieldBucket::Amounts,
    },
    CanonicalField {
        name: "TotalTax",
        aliases: &["TotalTax", "Tax", "VAT", "Sales Tax"],
        bucket: FieldBucket::Amounts,
    },
    CanonicalField {
        name: "AmountDue",
        aliases: &["AmountDue", "Amount Due"],
        bucket: FieldBucket::Amounts,
    },
    CanonicalField {
        name: "PurchaseOrder",
        aliases: &["PurchaseOrder", "Purchase Order", "PO Number", "PO"],
        bucket: FieldBucket::Amounts,
    },
    // 客户信息
    CanonicalField {
        name: "CustomerName",
        aliases: &["CustomerName", "Customer Name", "Bill To", "Client", "Customer"],
        bucket: FieldBucket::ClientInfo,
    },
    CanonicalField {
        name: "CustomerId",
        aliases: &["CustomerId", "Customer Id", "Customer Number"],
        bucket: FieldBucket::ClientInfo,
    },
    CanonicalField {
        name: "CustomerAddress",
        aliases: &["CustomerAddress", "Customer Address", "Billing Address"],
        bucket: FieldBucket::ClientInfo,
    },
    CanonicalField {
        name: "ShippingAddress",
        aliases: &["ShippingAddress", "Shipping Address", "Ship To"],
        bucket: FieldBucket::ClientInfo,
    },
    // 付款信息
    CanonicalField {
        name: "PaymentTerm",
        aliases: &["PaymentTerm", "Payment Terms", "Terms"],
        bucket: FieldBucket::PaymentDetails,
    },
    CanonicalField {
        name: "IBAN",
        aliases: &["IBAN", "Iban"],
        bucket: FieldBucket::PaymentDetails,
    },
    CanonicalField {
        name: "SWIFT",
        aliases: &["SWIFT", "BIC"],
        bucket: FieldBucket::PaymentDetails,
    },
    CanonicalField {
        name: "BankAccountNumber",
        aliases: &["BankAccountNumber", "Account Number", "Bank Account"],
        bucket: FieldBucket::PaymentDetails,
    },
    // 商品/行项目字段, 同一文档内合并为一条记录
    CanonicalField {
        name: "Items",
        aliases: &["Items", "Item"],
        bucket: FieldBucket::ProductDetails,
    },
    CanonicalField {
        name: "ProductDetails",
        aliases: &["ProductDetails", "Product Details"],
        bucket: FieldBucket::ProductDetails,
    },
    CanonicalField {
        name: "ItemDetails",
        aliases: &["ItemDetails", "Item Details"],
        bucket: FieldBucket::ProductDetails,
    },
    CanonicalField {
        name: "Product",
        aliases: &["Product", "Products"],
        bucket: FieldBucket::ProductDetails,
    },
    CanonicalField {
        name: "Description",
        aliases: &["Description"],
        bucket: FieldBucket::ProductDetails,
    },
    CanonicalField {
        name: "Service",
        aliases: &["Service", "Services"],
        bucket: FieldBucket::ProductDetails,
    },
];

/// 将单个识别文档的字段按同义词表归入各分组
///
/// - 值按规范字段去重, 首次出现保留其置信度
/// - 商品字段在文档内合并为一条记录, 非空时追加到 ProductDetails
/// - 没有任何别名命中的规范字段不会出现在分组里
pub fn resolve_document(doc: &AnalyzedDocument, result: &mut InvoiceResult) {
    let mut products = FieldGroup::default();

    for field in FIELD_SYNONYMS {
        for alias in field.aliases {
            let Some(raw) = doc.fields.get(*alias) else {
                continue;
            };
            let Some(value) = extract_value(raw) else {
                continue;
            };
            let confidence = raw.confidence.unwrap_or(0.0) * 100.0;

            let group = match field.bucket {
                FieldBucket::InvoiceFields => &mut result.invoice_fields,
                FieldBucket::Amounts => &mut result.amount_details,
                FieldBucket::ClientInfo => &mut result.client_information,
                FieldBucket::PaymentDetails => &mut result.payment_details,
                FieldBucket::ProductDetails => &mut products,
            };
            push_unique(group, field.name, value, confidence);
        }
    }

    if !products.is_empty() {
        result.product_details.push(products);
    }
}

/// 追加抽取值, 相同值只保留第一次出现
fn push_unique(group: &mut FieldGroup, name: &'static str, value: String, confidence: f64) {
    let values = group.entry(name).or_default();
    if values.iter().any(|v| v.value == value) {
        return;
    }
    values.push(FieldValue::new(value, confidence));
}

/// 按字段声明类型取值: date -> YYYY-MM-DD, number -> 十进制字符串, 其余用识别原文
///
/// 类型与实际值不符时回退到原始文本, 不让单个字段拖垮整个请求。
fn extract_value(field: &DocumentField) -> Option<String> {
    let raw = field
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    match field.field_type.as_deref() {
        Some("date") => field
            .value_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.format("%Y-%m-%d").to_string())
            .or(raw),
        Some("number") => field.value_number.map(format_number).or(raw),
        Some("currency") => field
            .value_currency
            .as_ref()
            .map(|c| format_number(c.amount))
            .or(raw),
        _ => field
            .value_string
            .clone()
            .filter(|s| !s.is_empty())
            .or(raw),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
