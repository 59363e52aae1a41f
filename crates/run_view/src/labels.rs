use crate::RunContext;

/// Labels for phases the platform is known to emit. Dynamic merge phases
/// and fixed pipeline ids share one table.
const KNOWN_LABELS: &[(&str, &str)] = &[
    // merge phases
    ("connection_test", "连接测试"),
    ("before_validation", "合并前校验"),
    ("temp_table_build", "临时表构建"),
    ("data_merge", "数据合并"),
    ("atomic_swap", "原子切换"),
    ("after_validation", "合并后校验"),
    ("cleanup", "清理"),
    // scan pipeline
    ("init", "初始化"),
    ("scan", "扫描"),
    ("summary", "汇总"),
    // archive pipeline
    ("prepare", "准备"),
    ("archive", "归档"),
    ("finalize", "收尾"),
    // test-table pipeline
    ("initialization", "初始化"),
    ("hdfs_setup", "HDFS 准备"),
    ("hive_table_creation", "Hive 建表"),
    ("partition_creation", "分区创建"),
    ("data_generation", "数据生成"),
    ("verification", "数据校验"),
    ("completed", "完成"),
];

/// Resolves the display label for a phase key.
///
/// Lookup order: context overrides, the built-in table, then the fallback
/// transformation (underscore tokens → capitalized words joined by spaces)
/// for phases the platform grew after this table was written.
pub fn phase_label(ctx: &RunContext, key: &str) -> String {
    if let Some(label) = ctx.labels.get(key) {
        return label.clone();
    }
    if let Some((_, label)) = KNOWN_LABELS.iter().find(|(known, _)| *known == key) {
        return (*label).to_string();
    }
    humanize(key)
}

fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
