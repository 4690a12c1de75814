use dddb_client_core::analysis::{AnalysisAction, AnalysisState, ChatPhase};
use dddb_client_core::chart::ChartSummary;
use dddb_client_core::format::{format_number, format_stat};
use dddb_client_core::types::{ChatMessage, ChatRole, DataInfo};
use dddb_client_core::validation::ANALYSIS_UPLOAD_LIMIT_MB;
use iced::widget::{button, column, container, row, text, text_input, Column, Row, Space};
use iced::{Alignment, Element, Length};

use super::{action_button, analysis_msg, card, error_banner, heading, markdown, muted, secondary_button, subheading, table};
use crate::app::{DddbApp, Message};
use crate::theme;

fn file_panel<'a>(app: &'a DddbApp, analysis: &'a AnalysisState) -> Element<'a, Message> {
    let can_pick = !analysis.uploading && analysis.phase != ChatPhase::Analyzing;
    let label = if analysis.has_file() { "Replace file…" } else { "Choose file…" };

    let status: Element<Message> = if analysis.uploading {
        app.spinner.view("Uploading and profiling file…")
    } else {
        match (&analysis.file_name, analysis.has_file()) {
            (Some(name), true) => text(format!("Loaded {name}")).size(14).into(),
            (None, true) => muted("Using data from an earlier session."),
            _ => muted(format!("CSV files only, smaller than {ANALYSIS_UPLOAD_LIMIT_MB}MB.")),
        }
    };

    let delete: Element<Message> = if analysis.confirm_delete {
        row![
            text("Delete the uploaded data from the server?").size(13).color(theme::Colors::ERROR),
            button(text("Delete").size(13))
                .on_press(analysis_msg(AnalysisAction::ConfirmDelete))
                .padding([6, 12])
                .style(theme::danger_button),
            secondary_button("Cancel", Some(analysis_msg(AnalysisAction::CancelDelete))),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    } else if analysis.deleting {
        app.spinner.view("Deleting…")
    } else {
        secondary_button(
            "Delete data",
            analysis.has_file().then(|| analysis_msg(AnalysisAction::RequestDelete)),
        )
    };

    card(
        column![
            row![
                action_button(label, can_pick.then(|| analysis_msg(AnalysisAction::ChooseFile))),
                status,
                Space::with_width(Length::Fill),
                delete,
            ]
            .spacing(12)
            .align_y(Alignment::Center),
        ]
        .spacing(10),
    )
}

fn data_info(info: &DataInfo) -> Element<Message> {
    let missing: u64 = info.missing_values.values().sum();
    let mut content = column![
        subheading("Dataset"),
        table::facts(vec![
            ("Rows".into(), format_number(info.shape.0)),
            ("Columns".into(), format_number(info.shape.1)),
            ("Missing values".into(), format_number(missing)),
        ]),
    ]
    .spacing(10);

    if !info.sample_data.is_empty() {
        content = content.push(table::records(&info.columns, &info.sample_data));
    }
    card(content)
}

fn suggestions(analysis: &AnalysisState) -> Element<Message> {
    let enabled = analysis.phase == ChatPhase::Idle;
    let chips = analysis.suggestions.iter().map(|q| {
        button(text(q.as_str()).size(13))
            .on_press_maybe(enabled.then(|| analysis_msg(AnalysisAction::UseSuggestion(q.clone()))))
            .padding([6, 12])
            .style(theme::suggestion_button)
            .into()
    });
    column![muted("Try asking"), Row::with_children(chips).spacing(8).wrap()]
        .spacing(6)
        .into()
}

fn chart_note(message: &ChatMessage) -> Option<Element<Message>> {
    let figure = message.chart.as_ref()?.figure()?;
    let summary = ChartSummary::from_figure(&figure);
    if summary.is_empty() {
        return None;
    }
    let lines = summary.traces.iter().map(|t| {
        muted(format!(
            "{}: {} {} points, mean {}",
            t.name,
            t.points,
            t.kind,
            format_stat(t.mean())
        ))
    });
    let title = column![text(summary.title.clone().unwrap_or_else(|| "Chart".to_string())).size(13)];
    let note = lines.fold(title, |note, line| note.push(line));
    Some(
        container(note.spacing(2))
            .padding(8)
            .width(Length::Fill)
            .style(theme::code_block)
            .into(),
    )
}

fn message_view(message: &ChatMessage) -> Element<Message> {
    let time = message.timestamp.format("%H:%M").to_string();
    match message.role {
        ChatRole::User => row![
            Space::with_width(Length::FillPortion(1)),
            container(column![text(message.message.as_str()).size(14), muted(time)].spacing(4))
                .padding([10, 14])
                .width(Length::FillPortion(3))
                .style(theme::user_message),
        ]
        .into(),
        ChatRole::Assistant => {
            let mut body = column![markdown::render(&message.message)].spacing(8);
            if let Some(note) = chart_note(message) {
                body = body.push(note);
            }
            container(body.push(muted(time)))
                .padding([10, 14])
                .width(Length::Fill)
                .style(theme::assistant_message)
                .into()
        }
        ChatRole::Error => container(text(message.message.as_str()).size(14))
            .padding([10, 14])
            .width(Length::Fill)
            .style(theme::error_message)
            .into(),
    }
}

fn chat<'a>(app: &'a DddbApp, analysis: &'a AnalysisState) -> Element<'a, Message> {
    let mut transcript = Column::with_children(analysis.transcript.iter().map(message_view)).spacing(10);
    if analysis.phase == ChatPhase::Analyzing {
        transcript = transcript.push(app.spinner.view("Analyzing…"));
    }

    let submit = analysis.can_submit().then(|| analysis_msg(AnalysisAction::Submit));
    let mut input = text_input("Ask a question about your data", &analysis.input)
        .padding(10)
        .style(theme::input);
    if analysis.phase == ChatPhase::Idle {
        input = input.on_input(|value| analysis_msg(AnalysisAction::InputChanged(value)));
        if let Some(msg) = submit.clone() {
            input = input.on_submit(msg);
        }
    }

    card(
        column![
            row![
                subheading("Conversation"),
                Space::with_width(Length::Fill),
                secondary_button(
                    "Clear chat",
                    (!analysis.transcript.is_empty()).then(|| analysis_msg(AnalysisAction::ClearChat)),
                ),
            ]
            .align_y(Alignment::Center),
            transcript,
            row![input, action_button("Send", submit)].spacing(8),
        ]
        .spacing(12),
    )
}

pub fn view(app: &DddbApp) -> Element<Message> {
    let analysis = &app.state.analysis;

    let mut page = column![heading("Analysis Agent"), file_panel(app, analysis)].spacing(16);
    if let Some(error) = &analysis.error {
        page = page.push(error_banner(error, analysis_msg(AnalysisAction::DismissError)));
    }
    if !analysis.has_file() {
        return page
            .push(muted("Upload a CSV file to start asking questions about it."))
            .into();
    }

    if let Some(info) = &analysis.data_info {
        page = page.push(data_info(info));
    }
    if !analysis.suggestions.is_empty() {
        page = page.push(suggestions(analysis));
    }
    page.push(chat(app, analysis)).into()
}
