use dddb_client_core::chart::ChartSummary;
use dddb_client_core::format::{format_number, format_percentage, format_stat};
use dddb_client_core::types::*;
use dddb_client_core::wizard::{WizardAction, WizardState};
use iced::widget::{column, pick_list, progress_bar, row, text, Column, Row};
use iced::{Alignment, Element, Length};

use super::{action_button, card, muted, secondary_button, subheading, table, wizard_msg};
use crate::app::Message;
use crate::theme;

const HISTOGRAM_BINS: usize = 12;

fn comparison(result: &ProcessingResponse) -> Element<Message> {
    card(
        column![
            subheading("Summary"),
            text(result.message.clone()).size(14).color(theme::Colors::SUCCESS),
            table::facts(vec![
                ("Original rows".into(), format_number(result.original_rows)),
                ("Augmented rows".into(), format_number(result.augmented_rows)),
                ("Increase".into(), format_percentage(result.increase_ratio)),
                ("Processing time".into(), format!("{:.2}s", result.processing_time)),
            ]),
        ]
        .spacing(10),
    )
}

fn statistics(stats: &Statistics) -> Element<Message> {
    let rows = stats
        .comparisons()
        .into_iter()
        .map(|c| {
            vec![
                c.column,
                c.stat,
                format_stat(c.original),
                format_stat(c.augmented),
            ]
        })
        .collect::<Vec<_>>();

    let body: Element<Message> = if rows.is_empty() {
        muted("No numeric statistics available.")
    } else {
        table::grid(
            vec!["Column".into(), "Statistic".into(), "Original".into(), "Augmented".into()],
            rows,
        )
    };

    card(column![subheading("Statistics"), body].spacing(10))
}

/// Trace means and a coarse histogram per trace over a shared range.
fn chart(visualization: &Visualization) -> Element<Message> {
    let summary = ChartSummary::from_figure(&visualization.chart_data);
    let title = summary
        .title
        .clone()
        .unwrap_or_else(|| format!("Distribution of {}", visualization.column_name));

    let mut body = Column::new().spacing(12);
    match summary.value_range() {
        Some(range) => {
            for trace in &summary.traces {
                let counts = trace.histogram(HISTOGRAM_BINS, range);
                let peak = counts.iter().copied().max().unwrap_or(0).max(1) as f32;
                let bars = Row::with_children(counts.into_iter().map(|n| {
                    progress_bar(0.0..=peak, n as f32)
                        .height(Length::Fixed(8.0))
                        .width(Length::Fixed(36.0))
                        .into()
                }))
                .spacing(2);
                body = body.push(
                    column![
                        text(format!(
                            "{} ({}, {} points, mean {})",
                            trace.name,
                            trace.kind,
                            trace.points,
                            format_stat(trace.mean())
                        ))
                        .size(13),
                        bars,
                    ]
                    .spacing(4),
                );
            }
            body = body.push(muted(format!(
                "Range {} to {}",
                format_stat(Some(range.0)),
                format_stat(Some(range.1))
            )));
        }
        None => body = body.push(muted("The chart carries no numeric values to summarize.")),
    }

    card(column![subheading(title), body].spacing(10))
}

fn data_page(wizard: &WizardState) -> Element<Message> {
    let Some(page) = &wizard.processed else {
        return card(muted("No rows loaded."));
    };

    let change = |p: u32, size: u32| wizard_msg(WizardAction::ChangePage { page: p, page_size: size });
    let idle = !wizard.page_loading;

    let range = match page.row_range() {
        Some((first, last)) => format!(
            "Rows {}–{} of {}",
            format_number(first),
            format_number(last),
            format_number(page.total_rows)
        ),
        None => "No rows".to_string(),
    };

    let controls = row![
        secondary_button(
            "Previous",
            (idle && page.has_previous()).then(|| change(page.page - 1, page.page_size)),
        ),
        text(format!("Page {} of {}", page.page + 1, page.total_pages.max(1))).size(14),
        secondary_button(
            "Next",
            (idle && page.has_next()).then(|| change(page.page + 1, page.page_size)),
        ),
        muted(range),
        pick_list(ProcessedPage::PAGE_SIZES, Some(page.page_size), move |size| change(0, size)),
        muted("rows per page"),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    card(
        column![
            subheading("Augmented data"),
            controls,
            table::records(&page.headers(), &page.data),
        ]
        .spacing(10),
    )
}

fn downloads(wizard: &WizardState) -> Element<Message> {
    let buttons = DownloadEncoding::ALL.iter().map(|encoding| {
        secondary_button(encoding.label(), Some(wizard_msg(WizardAction::Download(*encoding))))
    });

    let mut content = column![
        subheading("Download"),
        Row::with_children(buttons).spacing(8),
    ]
    .spacing(10);
    if let Some(status) = &wizard.download_status {
        content = content.push(muted(status.clone()));
    }
    card(content)
}

pub fn view(wizard: &WizardState) -> Element<Message> {
    let mut page = Column::new().spacing(16);

    if let Some(result) = &wizard.processing {
        page = page.push(comparison(result));
    }
    if let Some(stats) = &wizard.statistics {
        page = page.push(statistics(stats));
    }
    if let Some(visualization) = &wizard.visualization {
        page = page.push(chart(visualization));
    }

    page.push(data_page(wizard))
        .push(downloads(wizard))
        .push(action_button(
            "Start a new augmentation",
            Some(wizard_msg(WizardAction::StartOver)),
        ))
        .into()
}
