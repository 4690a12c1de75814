use dddb_client_core::config::*;
use dddb_client_core::format::format_number;
use dddb_client_core::types::*;
use dddb_client_core::wizard::{WizardAction, WizardState};
use iced::widget::{button, column, pick_list, radio, row, slider, text, text_input, Column};
use iced::{Alignment, Element, Length};

use super::{action_button, card, muted, secondary_button, subheading, table, wizard_msg};
use crate::app::Message;
use crate::theme;

fn edit(edit: ConfigEdit) -> Message {
    wizard_msg(WizardAction::Edit(edit))
}

fn labeled<'a>(label: &'a str, control: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    row![
        text(label).size(14).width(Length::Fixed(200.0)),
        control.into(),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

fn summary(upload: &UploadResponse) -> Element<Message> {
    let s = &upload.summary;
    let overview = upload
        .column_overview()
        .into_iter()
        .map(|c| vec![c.column, c.data_type, format_number(c.missing)])
        .collect();

    card(
        column![
            subheading("Uploaded data"),
            table::facts(vec![
                ("Rows".into(), format_number(s.total_rows)),
                ("Columns".into(), format_number(s.total_columns)),
                ("Numeric columns".into(), s.numeric_columns.len().to_string()),
                ("Categorical columns".into(), s.categorical_columns.len().to_string()),
            ]),
            table::grid(
                vec!["Column".into(), "Type".into(), "Missing".into()],
                overview
            ),
            muted(format!("Preview (first {} rows)", upload.preview().len())),
            table::records(&upload.column_names(), upload.preview()),
        ]
        .spacing(12),
    )
}

fn preprocessing(form: &ConfigForm) -> Element<Message> {
    let pre = &form.config.preprocessing_config;

    let column_types = Column::with_children(form.columns.iter().map(|name| {
        let column = name.clone();
        labeled(
            name,
            pick_list(ColumnKind::ALL, Some(form.column_kind(name)), move |kind| {
                edit(ConfigEdit::SetColumnType {
                    column: column.clone(),
                    kind,
                })
            }),
        )
    }))
    .spacing(6);

    card(
        column![
            subheading("Preprocessing"),
            labeled(
                "Missing values",
                pick_list(MissingStrategy::ALL, Some(pre.missing_strategy), |s| {
                    edit(ConfigEdit::SetMissingStrategy(s))
                }),
            ),
            labeled(
                "Outliers",
                pick_list(OutlierStrategy::ALL, Some(pre.outlier_strategy), |s| {
                    edit(ConfigEdit::SetOutlierStrategy(s))
                }),
            ),
            muted("Column types"),
            column_types,
        ]
        .spacing(12),
    )
}

fn smote_options(form: &ConfigForm) -> Element<Message> {
    let aug = &form.config.augmentation_config;
    let k = aug.k_neighbors.unwrap_or(DEFAULT_K_NEIGHBORS);

    column![
        labeled(
            "Target column",
            pick_list(form.columns.clone(), aug.target_column.clone(), |c| {
                edit(ConfigEdit::SetTargetColumn(c))
            }),
        ),
        labeled(
            "Neighbours (k)",
            row![
                slider(K_NEIGHBORS_MIN..=K_NEIGHBORS_MAX, k, |k| edit(ConfigEdit::SetKNeighbors(k)))
                    .width(Length::Fixed(240.0)),
                text(k.to_string()).size(14),
            ]
            .spacing(12),
        ),
        labeled(
            "Sampling strategy",
            pick_list(SamplingStrategy::ALL, aug.sampling_strategy, |s| {
                edit(ConfigEdit::SetSamplingStrategy(s))
            }),
        ),
    ]
    .spacing(10)
    .into()
}

fn amount_options(form: &ConfigForm) -> Element<Message> {
    let aug = &form.config.augmentation_config;
    let mode = |label: &str, value: AmountMode| {
        radio(label.to_string(), value, Some(form.amount_mode), |m| {
            edit(ConfigEdit::SetAmountMode(m))
        })
        .size(16)
    };

    let control: Element<Message> = match form.amount_mode {
        AmountMode::Ratio => {
            let ratio = aug.augmentation_ratio.unwrap_or(DEFAULT_RATIO);
            labeled(
                "Augmentation ratio",
                row![
                    slider(RATIO_MIN..=RATIO_MAX, ratio, |r| edit(ConfigEdit::SetRatio(r)))
                        .step(0.1)
                        .width(Length::Fixed(240.0)),
                    text(format!("{ratio:.1}×")).size(14),
                ]
                .spacing(12),
            )
        }
        AmountMode::TargetRows => {
            let rows = form.target_rows;
            let step = |delta: i64| {
                let next = (i64::from(rows) + delta).max(0) as u32;
                edit(ConfigEdit::SetTargetRows(Some(next)))
            };
            labeled(
                "Target rows",
                row![
                    secondary_button("−", (rows > TARGET_ROWS_MIN).then(|| step(-i64::from(TARGET_ROWS_STEP)))),
                    text_input("1000", &form.target_rows_input)
                        .on_input(|value| edit(ConfigEdit::TargetRowsInput(value)))
                        .on_submit(edit(form.typed_target_rows()))
                        .padding(8)
                        .width(Length::Fixed(120.0))
                        .style(theme::input),
                    secondary_button("+", (rows < TARGET_ROWS_MAX).then(|| step(i64::from(TARGET_ROWS_STEP)))),
                    muted(format!(
                        "{} to {}, Enter to apply",
                        format_number(u64::from(TARGET_ROWS_MIN)),
                        format_number(u64::from(TARGET_ROWS_MAX))
                    )),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            )
        }
    };

    column![
        row![
            mode("Ratio", AmountMode::Ratio),
            mode("Target rows", AmountMode::TargetRows),
        ]
        .spacing(24),
        control,
    ]
    .spacing(10)
    .into()
}

fn augmentation(form: &ConfigForm) -> Element<Message> {
    let methods = AugmentationMethod::ALL.iter().map(|method| {
        let selected = form.method() == *method;
        button(text(method.to_string()).size(14))
            .on_press(edit(ConfigEdit::SetMethod(*method)))
            .padding([8, 14])
            .style(if selected {
                theme::nav_button_active
            } else {
                theme::secondary_button
            })
            .into()
    });

    card(
        column![
            subheading("Augmentation"),
            iced::widget::Row::with_children(methods).spacing(8),
            if form.is_smote() {
                smote_options(form)
            } else {
                amount_options(form)
            },
        ]
        .spacing(12),
    )
}

pub fn view(wizard: &WizardState) -> Element<Message> {
    let Some(form) = &wizard.form else {
        return muted("No file uploaded yet.");
    };

    let mut page = Column::new().spacing(16);
    if let Some(upload) = &wizard.upload {
        page = page.push(summary(upload));
    }

    page.push(preprocessing(form))
        .push(augmentation(form))
        .push(
            row![
                secondary_button("Start over", Some(wizard_msg(WizardAction::StartOver))),
                action_button(
                    "Start augmentation",
                    wizard.can_process().then(|| wizard_msg(WizardAction::StartProcessing)),
                ),
            ]
            .spacing(12),
        )
        .into()
}
