use super::{reclassify, synonyms};
use crate::azure::FormRecognizerClient;
use crate::error::ExtractError;
use crate::models::{AnalyzedTable, InvoiceResult, TableDetail};
use tracing::info;

/// 发票抽取服务
pub struct ExtractorService {
    client: FormRecognizerClient,
}

impl ExtractorService {
    pub fn new(client: FormRecognizerClient) -> Self {
        Self { client }
    }

    /// 单个文档的完整抽取流程
    pub async fn extract(
        &self,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<InvoiceResult, ExtractError> {
        // 1. 调用外部文档识别服务
        let analysis = self.client.analyze(body, content_type).await?;
        info!(
            "Analysis returned {} documents, {} tables",
            analysis.documents.len(),
            analysis.tables.len()
        );

        let mut result = InvoiceResult::default();

        // 2. 每个识别文档按同义词表归组
        for doc in &analysis.documents {
            synonyms::resolve_document(doc, &mut result);
        }

        // 3. 表格按文档/页/表顺序扁平化
        for table in &analysis.tables {
            result.table_details.push(flatten_table(table));
        }

        // 4. 低置信度重评级
        reclassify::reclassify(&mut result);

        Ok(result)
    }
}

/// 将单元格列表铺成 (行, 列) 零基网格
///
/// 行按需创建, 被寻址的行补空串到目标列; 未被寻址的中间行保持为空。
pub fn flatten_table(table: &AnalyzedTable) -> TableDetail {
    let mut grid: Vec<Vec<String>> = Vec::new();

    for cell in &table.cells {
        while grid.len() <= cell.row_index {
            grid.push(Vec::new());
        }
        let row = &mut grid[cell.row_index];
        while row.len() <= cell.column_index {
            row.push(String::new());
        }
        row[cell.column_index] = cell.content.clone();
    }

    TableDetail { table: grid }
}
