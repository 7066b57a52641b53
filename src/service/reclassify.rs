use crate::models::{FieldGroup, InvoiceResult};
use lazy_static::lazy_static;
use regex::Regex;

/// 低置信度阈值, 低于该值的字段才会被重新评级
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 50.0;
/// 纯数字形状 (最多两位小数) 的修正置信度
pub const NUMERIC_CONFIDENCE: f64 = 90.0;
/// 大写字母数字编码形状的修正置信度
pub const CODE_CONFIDENCE: f64 = 85.0;
/// 不匹配任何形状时的低置信度下限, 字段保留但标记为不可靠
pub const UNRELIABLE_CONFIDENCE: f64 = 25.0;
/// 采购订单号 (恰好 10 位数字) 的修正置信度
pub const PURCHASE_ORDER_CONFIDENCE: f64 = 85.0;

const PURCHASE_ORDER_FIELD: &str = "PurchaseOrder";

lazy_static! {
    // 十进制数, 小数部分最多两位
    static ref NUMERIC_VALUE: Regex = Regex::new(r"^\d+(\.\d{1,2})?$").unwrap();

    // 大写字母数字编码, 允许斜杠和连字符
    static ref CODE_VALUE: Regex = Regex::new(r"^[A-Z0-9/-]+$").unwrap();

    // 采购订单号: 恰好 10 位数字
    static ref PURCHASE_ORDER_VALUE: Regex = Regex::new(r"^\d{10}$").unwrap();
}

/// 对整个抽取结果做置信度重评级
///
/// 只改写低于阈值的置信度, 从不删除值; 对同一结果重复执行输出不变。
pub fn reclassify(result: &mut InvoiceResult) {
    reclassify_group(&mut result.invoice_fields);
    reclassify_amounts(&mut result.amount_details);
    reclassify_group(&mut result.client_information);
    reclassify_group(&mut result.payment_details);
    for record in &mut result.product_details {
        reclassify_group(record);
    }
}

/// 通用规则: 按值的形状改写低置信度
pub fn reclassify_group(group: &mut FieldGroup) {
    for values in group.values_mut() {
        for fv in values.iter_mut() {
            if fv.confidence < LOW_CONFIDENCE_THRESHOLD {
                fv.confidence = shape_confidence(&fv.value);
            }
        }
    }
}

/// 金额分组: PurchaseOrder 字段在通用规则之前先检查订单号形状
pub fn reclassify_amounts(group: &mut FieldGroup) {
    for (name, values) in group.iter_mut() {
        for fv in values.iter_mut() {
            if fv.confidence >= LOW_CONFIDENCE_THRESHOLD {
                continue;
            }
            if *name == PURCHASE_ORDER_FIELD && PURCHASE_ORDER_VALUE.is_match(&fv.value) {
                fv.confidence = PURCHASE_ORDER_CONFIDENCE;
            } else {
                fv.confidence = shape_confidence(&fv.value);
            }
        }
    }
}

fn shape_confidence(value: &str) -> f64 {
    if NUMERIC_VALUE.is_match(value) {
        NUMERIC_CONFIDENCE
    } else if CODE_VALUE.is_match(value) {
        CODE_CONFIDENCE
    } else {
        UNRELIABLE_CONFIDENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    fn group_of(name: &'static str, value: &str, confidence: f64) -> FieldGroup {
        let mut group = FieldGroup::default();
        group.insert(name, vec![FieldValue::new(value, confidence)]);
        group
    }

    #[test]
    fn test_numeric_value_raised_to_90() {
        let mut group = group_of("InvoiceTotal", "1234.50", 30.0);
        reclassify_group(&mut group);
        assert_eq!(group["InvoiceTotal"][0].confidence, NUMERIC_CONFIDENCE);
    }

    #[test]
    fn test_numeric_three_decimals_is_not_numeric_shape() {
        let mut group = group_of("InvoiceTotal", "12.345", 30.0);
        reclassify_group(&mut group);
        // 小数点不在编码字符集里, 回落到低置信度下限
        assert_eq!(group["InvoiceTotal"][0].confidence, UNRELIABLE_CONFIDENCE);
    }

    #[test]
    fn test_code_value_raised_to_85() {
        let mut group = group_of("InvoiceId", "INV-002", 40.0);
        reclassify_group(&mut group);
        assert_eq!(group["InvoiceId"][0].confidence, CODE_CONFIDENCE);
    }

    #[test]
    fn test_other_value_floored_to_25() {
        let mut group = group_of("CustomerName", "acme corp", 10.0);
        reclassify_group(&mut group);
        assert_eq!(group["CustomerName"][0].confidence, UNRELIABLE_CONFIDENCE);
        assert_eq!(group["CustomerName"][0].value, "acme corp");
    }

    #[test]
    fn test_at_or_above_threshold_untouched() {
        let mut group = group_of("InvoiceId", "weird value!", 50.0);
        reclassify_group(&mut group);
        assert_eq!(group["InvoiceId"][0].confidence, 50.0);

        let mut group = group_of("InvoiceId", "weird value!", 97.5);
        reclassify_group(&mut group);
        assert_eq!(group["InvoiceId"][0].confidence, 97.5);
    }

    #[test]
    fn test_purchase_order_ten_digits_forced_to_85() {
        // 通用规则会给 90, 订单号形状优先给 85
        let mut group = group_of("PurchaseOrder", "1234567890", 20.0);
        reclassify_amounts(&mut group);
        assert_eq!(group["PurchaseOrder"][0].confidence, PURCHASE_ORDER_CONFIDENCE);
    }

    #[test]
    fn test_purchase_order_other_shapes_use_general_rule() {
        let mut group = group_of("PurchaseOrder", "123456789", 20.0);
        reclassify_amounts(&mut group);
        assert_eq!(group["PurchaseOrder"][0].confidence, NUMERIC_CONFIDENCE);

        let mut group = group_of("PurchaseOrder", "PO/2024-001", 20.0);
        reclassify_amounts(&mut group);
        assert_eq!(group["PurchaseOrder"][0].confidence, CODE_CONFIDENCE);
    }

    #[test]
    fn test_ten_digits_outside_purchase_order_get_90() {
        let mut group = group_of("InvoiceTotal", "1234567890", 20.0);
        reclassify_amounts(&mut group);
        assert_eq!(group["InvoiceTotal"][0].confidence, NUMERIC_CONFIDENCE);
    }

    #[test]
    fn test_reclassify_is_idempotent() {
        let mut result = InvoiceResult::default();
        result.invoice_fields = group_of("InvoiceId", "INV-002", 40.0);
        result.amount_details = group_of("PurchaseOrder", "1234567890", 20.0);
        result.client_information = group_of("CustomerName", "acme corp", 10.0);
        result.product_details.push(group_of("Description", "widget x2", 5.0));

        reclassify(&mut result);
        let first = serde_json::to_value(&result).unwrap();
        reclassify(&mut result);
        let second = serde_json::to_value(&result).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_reclassify_never_drops_values() {
        let mut result = InvoiceResult::default();
        result.payment_details = group_of("IBAN", "??", 1.0);
        reclassify(&mut result);
        assert_eq!(result.payment_details["IBAN"].len(), 1);
    }
}
