use dddb_client_core::markdown::{parse, Block, Span};
use iced::widget::{column, container, row, text, Column, Row};
use iced::{Element, Font, Length};

use crate::app::Message;
use crate::theme;

fn spans<'a>(spans: Vec<Span>, size: u16) -> Element<'a, Message> {
    Row::with_children(spans.into_iter().map(|span| {
        if span.code {
            container(text(span.text).size(size - 1).font(Font::MONOSPACE).color(theme::Colors::PRIMARY))
                .padding([0, 4])
                .style(theme::code_block)
                .into()
        } else {
            let weight = if span.bold {
                Font {
                    weight: iced::font::Weight::Bold,
                    ..Font::DEFAULT
                }
            } else {
                Font::DEFAULT
            };
            text(span.text).size(size).font(weight).into()
        }
    }))
    .spacing(2)
    .wrap()
    .into()
}

/// Renders an assistant reply.
pub fn render<'a>(source: &str) -> Element<'a, Message> {
    let blocks = parse(source).into_iter().map(|block| match block {
        Block::Heading { level, spans: s } => spans(s, 22u16.saturating_sub(u16::from(level) * 2).max(15)),
        Block::Bullet(s) => row![text("•").size(14), spans(s, 14)].spacing(6).into(),
        Block::Paragraph(s) => spans(s, 14),
        Block::Code { language, content } => {
            let mut block = column![];
            if let Some(lang) = language {
                block = block.push(text(lang).size(11).color(theme::Colors::TEXT_DIM));
            }
            container(block.push(text(content).size(13).font(Font::MONOSPACE)))
                .padding(10)
                .width(Length::Fill)
                .style(theme::code_block)
                .into()
        }
    });
    Column::with_children(blocks).spacing(8).into()
}
