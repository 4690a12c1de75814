//! Processing configuration form.
//!
//! The form is edited only through [`reduce`], which takes the current form
//! and one [`ConfigEdit`] and returns the next form. Keeping the merge logic in
//! one pure function is what makes the SMOTE / amount exclusivity rules hold
//! no matter which order the controls are touched in.

use crate::types::*;

pub const DEFAULT_RATIO: f64 = 1.0;
pub const RATIO_MIN: f64 = 0.1;
pub const RATIO_MAX: f64 = 5.0;

pub const DEFAULT_TARGET_ROWS: u32 = 1000;
pub const TARGET_ROWS_MIN: u32 = 100;
pub const TARGET_ROWS_MAX: u32 = 100_000;
pub const TARGET_ROWS_STEP: u32 = 100;

pub const DEFAULT_K_NEIGHBORS: u32 = 5;
pub const K_NEIGHBORS_MIN: u32 = 1;
pub const K_NEIGHBORS_MAX: u32 = 10;

/// How the amount of synthetic data is expressed for non-SMOTE methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmountMode {
    #[default]
    Ratio,
    TargetRows,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEdit {
    SetColumnType { column: String, kind: ColumnKind },
    SetMissingStrategy(MissingStrategy),
    SetOutlierStrategy(OutlierStrategy),
    SetMethod(AugmentationMethod),
    SetAmountMode(AmountMode),
    SetRatio(f64),
    /// `None` means the numeric input was emptied.
    SetTargetRows(Option<u32>),
    /// Text typed into the target rows input, committed on submit.
    TargetRowsInput(String),
    SetTargetColumn(String),
    SetKNeighbors(u32),
    SetSamplingStrategy(SamplingStrategy),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigForm {
    /// Every column of the uploaded file, in display order.
    pub columns: Vec<String>,
    /// Columns the server inferred as numeric.
    pub numeric_columns: Vec<String>,
    pub config: ProcessingConfig,
    pub amount_mode: AmountMode,
    /// Last target row count, kept while ratio mode is active.
    pub target_rows: u32,
    /// Contents of the target rows input. Digits only.
    pub target_rows_input: String,
}

impl ConfigForm {
    pub fn new(columns: Vec<String>, numeric_columns: Vec<String>) -> Self {
        Self {
            columns,
            numeric_columns,
            config: ProcessingConfig::default(),
            amount_mode: AmountMode::Ratio,
            target_rows: DEFAULT_TARGET_ROWS,
            target_rows_input: DEFAULT_TARGET_ROWS.to_string(),
        }
    }

    pub fn from_upload(upload: &UploadResponse) -> Self {
        Self::new(upload.column_names(), upload.summary.numeric_columns.clone())
    }

    /// The kind shown for a column: the user's override, else the inferred one.
    pub fn column_kind(&self, column: &str) -> ColumnKind {
        if let Some(kind) = self.config.preprocessing_config.column_types.get(column) {
            return *kind;
        }
        if self.numeric_columns.iter().any(|c| c == column) {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        }
    }

    pub fn method(&self) -> AugmentationMethod {
        self.config.augmentation_config.method
    }

    pub fn is_smote(&self) -> bool {
        self.method() == AugmentationMethod::Smote
    }

    /// The typed target rows as an edit. Digits too large for `u32` saturate.
    pub fn typed_target_rows(&self) -> ConfigEdit {
        let typed = self.target_rows_input.trim();
        let value = (!typed.is_empty()).then(|| typed.parse().unwrap_or(u32::MAX));
        ConfigEdit::SetTargetRows(value)
    }

    /// Applies text left in the target rows input without a submit.
    pub fn commit_typed(&self) -> ConfigForm {
        if self.amount_mode == AmountMode::TargetRows && self.target_rows_input != self.target_rows.to_string() {
            reduce(self, &self.typed_target_rows())
        } else {
            self.clone()
        }
    }
}

fn round_ratio(value: f64) -> f64 {
    let stepped = (value * 10.0).round() / 10.0;
    stepped.clamp(RATIO_MIN, RATIO_MAX)
}

// Both bounds are multiples of the step, so clamping first keeps the sum in range.
fn round_target_rows(value: u32) -> u32 {
    let clamped = value.clamp(TARGET_ROWS_MIN, TARGET_ROWS_MAX);
    ((clamped + TARGET_ROWS_STEP / 2) / TARGET_ROWS_STEP) * TARGET_ROWS_STEP
}

fn apply_amount(form: &mut ConfigForm) {
    let aug = &mut form.config.augmentation_config;
    match form.amount_mode {
        AmountMode::Ratio => {
            aug.target_rows = None;
            if aug.augmentation_ratio.is_none() {
                aug.augmentation_ratio = Some(DEFAULT_RATIO);
            }
        }
        AmountMode::TargetRows => {
            aug.augmentation_ratio = None;
            aug.target_rows = Some(form.target_rows);
        }
    }
}

/// Pure form transition.
pub fn reduce(form: &ConfigForm, edit: &ConfigEdit) -> ConfigForm {
    let mut next = form.clone();

    match edit {
        ConfigEdit::SetColumnType { column, kind } => {
            if next.columns.contains(column) {
                next.config
                    .preprocessing_config
                    .column_types
                    .insert(column.clone(), *kind);
            }
        }

        ConfigEdit::SetMissingStrategy(strategy) => {
            next.config.preprocessing_config.missing_strategy = *strategy;
        }

        ConfigEdit::SetOutlierStrategy(strategy) => {
            next.config.preprocessing_config.outlier_strategy = *strategy;
        }

        ConfigEdit::SetMethod(AugmentationMethod::Smote) => {
            let aug = &mut next.config.augmentation_config;
            aug.method = AugmentationMethod::Smote;
            aug.target_column = next.columns.first().cloned();
            aug.k_neighbors = Some(DEFAULT_K_NEIGHBORS);
            aug.sampling_strategy = Some(SamplingStrategy::Auto);
            aug.augmentation_ratio = None;
            aug.target_rows = None;
        }

        ConfigEdit::SetMethod(method) => {
            let aug = &mut next.config.augmentation_config;
            aug.method = *method;
            aug.target_column = None;
            aug.k_neighbors = None;
            aug.sampling_strategy = None;
            apply_amount(&mut next);
        }

        ConfigEdit::SetAmountMode(mode) => {
            if !next.is_smote() {
                next.amount_mode = *mode;
                let aug = &mut next.config.augmentation_config;
                match mode {
                    AmountMode::Ratio => {
                        aug.target_rows = None;
                        aug.augmentation_ratio = Some(DEFAULT_RATIO);
                    }
                    AmountMode::TargetRows => {
                        aug.augmentation_ratio = None;
                        aug.target_rows = Some(next.target_rows);
                        next.target_rows_input = next.target_rows.to_string();
                    }
                }
            }
        }

        ConfigEdit::SetRatio(value) => {
            if !next.is_smote() && next.amount_mode == AmountMode::Ratio {
                next.config.augmentation_config.augmentation_ratio = Some(round_ratio(*value));
            }
        }

        ConfigEdit::SetTargetRows(value) => {
            if !next.is_smote() && next.amount_mode == AmountMode::TargetRows {
                next.target_rows = value.map(round_target_rows).unwrap_or(DEFAULT_TARGET_ROWS);
                next.target_rows_input = next.target_rows.to_string();
                next.config.augmentation_config.target_rows = Some(next.target_rows);
            }
        }

        ConfigEdit::TargetRowsInput(text) => {
            next.target_rows_input = text.chars().filter(char::is_ascii_digit).collect();
        }

        ConfigEdit::SetTargetColumn(column) => {
            if next.is_smote() && next.columns.contains(column) {
                next.config.augmentation_config.target_column = Some(column.clone());
            }
        }

        ConfigEdit::SetKNeighbors(k) => {
            if next.is_smote() {
                next.config.augmentation_config.k_neighbors =
                    Some((*k).clamp(K_NEIGHBORS_MIN, K_NEIGHBORS_MAX));
            }
        }

        ConfigEdit::SetSamplingStrategy(strategy) => {
            if next.is_smote() {
                next.config.augmentation_config.sampling_strategy = Some(*strategy);
            }
        }
    }

    next
}
