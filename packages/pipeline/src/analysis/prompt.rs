//! Prompt templates for the three analysis steps.
//!
//! The wording is load-bearing: the classification template constrains the
//! model to a four-way label set, and the extraction template asks for a
//! comma-separated list that the pipeline splits verbatim.

const CLASSIFICATION_TEMPLATE: &str =
    "将以下文本分类到以下类别之一：新闻、博客、研究、其他。\n\n文本：{text}\n\n类别：（只输出类别本身，不要理由）";

const ENTITY_EXTRACTION_TEMPLATE: &str =
    "从以下文本中提取所有实体（人物、组织、地点）。以逗号分隔列表形式返回结果。\n\n文本：{text}\n\n实体：";

const SUMMARIZATION_TEMPLATE: &str = "用一句话总结以下文本。\n\n文本：{text}\n\n摘要：";

/// Build the classification prompt for the given text.
pub fn build_classification_prompt(text: &str) -> String {
    CLASSIFICATION_TEMPLATE.replace("{text}", text)
}

/// Build the entity-extraction prompt for the given text.
pub fn build_entity_extraction_prompt(text: &str) -> String {
    ENTITY_EXTRACTION_TEMPLATE.replace("{text}", text)
}

/// Build the summarization prompt for the given text.
pub fn build_summarization_prompt(text: &str) -> String {
    SUMMARIZATION_TEMPLATE.replace("{text}", text)
}
