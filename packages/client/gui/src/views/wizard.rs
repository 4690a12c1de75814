use dddb_client_core::wizard::{WizardAction, WizardStep};
use iced::widget::{column, container, row, text, Row, Space};
use iced::{Alignment, Element, Length};

use super::{card, configure, error_banner, heading, muted, results, upload, wizard_msg};
use crate::app::{DddbApp, Message};
use crate::theme;

fn step_indicator(current: WizardStep) -> Element<'static, Message> {
    let steps = WizardStep::ALL.iter().map(|step| {
        let active = *step == current;
        let done = step.index() < current.index();
        row![
            container(text((step.index() + 1).to_string()).size(13))
                .padding([4, 10])
                .style(theme::step_badge(active, done)),
            text(step.title()).size(14).color(if active {
                theme::Colors::TEXT
            } else {
                theme::Colors::TEXT_DIM
            }),
            Space::with_width(16),
        ]
        .spacing(8)
        .align_y(Alignment::Center)
        .into()
    });
    Row::with_children(steps).into()
}

pub fn view(app: &DddbApp) -> Element<Message> {
    let wizard = &app.state.wizard;

    let body: Element<Message> = match wizard.step {
        WizardStep::Upload => upload::view(app),
        WizardStep::Configure => configure::view(wizard),
        WizardStep::Processing => card(
            column![
                app.spinner.view("Augmenting data…"),
                muted("Preprocessing, synthesizing rows and computing statistics. This can take a while for larger files."),
            ]
            .spacing(12),
        ),
        WizardStep::Results => results::view(wizard),
    };

    let mut page = column![heading("CSV Augmentation"), step_indicator(wizard.step)].spacing(16);
    if let Some(error) = &wizard.error {
        page = page.push(error_banner(error, wizard_msg(WizardAction::DismissError)));
    }
    page.push(container(body).width(Length::Fill)).into()
}
