use dddb_client_core::format::format_cell;
use dddb_client_core::types::Row as DataRow;
use iced::widget::scrollable::{Direction, Scrollbar};
use iced::widget::{column, container, row, scrollable, text, Column, Row};
use iced::{Element, Length};

use crate::app::Message;
use crate::theme;

const CELL_WIDTH: f32 = 140.0;

fn cell<'a>(content: String, header: bool) -> Element<'a, Message> {
    let label = text(content).size(13).color(if header {
        theme::Colors::TEXT_DIM
    } else {
        theme::Colors::TEXT
    });
    container(label)
        .width(Length::Fixed(CELL_WIDTH))
        .padding([6, 8])
        .into()
}

/// Fixed-width text grid that scrolls sideways when it runs out of room.
pub fn grid<'a>(headers: Vec<String>, rows: Vec<Vec<String>>) -> Element<'a, Message> {
    let header = Row::with_children(headers.into_iter().map(|h| cell(h, true)));
    let body = rows
        .into_iter()
        .map(|r| Row::with_children(r.into_iter().map(|c| cell(c, false))).into());

    container(
        scrollable(column![header, Column::with_children(body)])
            .direction(Direction::Horizontal(Scrollbar::default())),
    )
    .width(Length::Fill)
    .style(theme::card)
    .into()
}

/// Records keyed by column, shown in `headers` order.
pub fn records<'a>(headers: &[String], rows: &[DataRow]) -> Element<'a, Message> {
    let cells = rows
        .iter()
        .map(|r| {
            headers
                .iter()
                .map(|h| r.get(h).map(format_cell).unwrap_or_default())
                .collect()
        })
        .collect();
    grid(headers.to_vec(), cells)
}

/// Label/value pairs on one line each.
pub fn facts<'a>(items: Vec<(String, String)>) -> Element<'a, Message> {
    Column::with_children(items.into_iter().map(|(k, v)| {
        row![
            text(k).size(13).color(theme::Colors::TEXT_DIM).width(Length::Fixed(180.0)),
            text(v).size(14),
        ]
        .into()
    }))
    .spacing(4)
    .into()
}
