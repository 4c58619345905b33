// SPDX-License-Identifier: MIT
use serde::{Deserialize, Serialize};

/// Descriptive metadata recorded alongside a test. Display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestInfo {
    pub scene: String,
    pub platform: String,
    pub engine_version: String,
    pub graphics_api: String,
    pub cpu: String,
    pub cpu_cores: u32,
    pub gpu: String,
    pub system_memory_mb: u32,
    pub os: String,
    pub quality: String,
    pub resolution: String,
    pub date: String,
}

/// A labelled, formatted `TestInfo` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoField {
    pub label: &'static str,
    pub value: String,
}

impl InfoField {
    fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

impl TestInfo {
    /// All fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> Vec<InfoField> {
        vec![
            InfoField::new("Scene", &self.scene),
            InfoField::new("Platform", &self.platform),
            InfoField::new("Engine Version", &self.engine_version),
            InfoField::new("Graphics API", &self.graphics_api),
            InfoField::new("CPU", &self.cpu),
            InfoField::new("CPU Cores", self.cpu_cores),
            InfoField::new("GPU", &self.gpu),
            InfoField::new("System Memory", format!("{} MB", self.system_memory_mb)),
            InfoField::new("OS", &self.os),
            InfoField::new("Quality", &self.quality),
            InfoField::new("Resolution", &self.resolution),
            InfoField::new("Date", &self.date),
        ]
    }

    /// Name used for the test in selectors; falls back when the scene is unset.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.scene.is_empty() {
            "<unnamed>"
        } else {
            &self.scene
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_keep_declaration_order() {
        let info = TestInfo {
            scene: "island".to_string(),
            cpu_cores: 8,
            system_memory_mb: 16384,
            ..TestInfo::default()
        };
        let fields = info.fields();
        assert_eq!(fields.len(), 12);
        assert_eq!(fields[0].label, "Scene");
        assert_eq!(fields[0].value, "island");
        assert_eq!(fields[5].value, "8");
        assert_eq!(fields[7].value, "16384 MB");
        assert_eq!(fields[11].label, "Date");
    }

    #[test]
    fn display_name_falls_back() {
        assert_eq!(TestInfo::default().display_name(), "<unnamed>");
    }
}
