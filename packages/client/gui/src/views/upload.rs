use dddb_client_core::validation::AUGMENTATION_UPLOAD_LIMIT_MB;
use dddb_client_core::wizard::WizardAction;
use iced::widget::column;
use iced::Element;

use super::{action_button, card, muted, subheading, wizard_msg};
use crate::app::{DddbApp, Message};

pub fn view(app: &DddbApp) -> Element<Message> {
    let wizard = &app.state.wizard;

    let status: Element<Message> = match (&wizard.file_name, wizard.uploading) {
        (Some(name), true) => app.spinner.view(format!("Uploading {name}…")),
        _ => muted(format!("CSV files only, smaller than {AUGMENTATION_UPLOAD_LIMIT_MB}MB.")),
    };

    card(
        column![
            subheading("Upload a CSV file"),
            muted("The file is profiled on the server: row and column counts, column types and missing values."),
            action_button(
                "Choose file…",
                (!wizard.uploading).then(|| wizard_msg(WizardAction::ChooseFile)),
            ),
            status,
        ]
        .spacing(12),
    )
}
