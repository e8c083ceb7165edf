use iced::widget::{button, image, row, text, Column};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;

use crate::state::session::FileListing;
use crate::Message;

/// Height of the preview column in each file row.
const PREVIEW_HEIGHT: f32 = 64.0;

/// Render the file panel for a subject: a loading placeholder, the
/// literal "no files" state, or one row per filename in server order.
///
/// Thumbnails arrive after this renders (the rasterizer is async); a row
/// whose thumbnail is not in `thumbnails` yet shows the document glyph.
pub fn view<'a>(
    subject: &'a str,
    listing: &'a FileListing,
    thumbnails: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    match listing {
        FileListing::Loading => text(format!("Loading files for {subject}...")).into(),
        FileListing::Loaded(files) if files.is_empty() => text("No files uploaded yet.").into(),
        FileListing::Loaded(files) => {
            let rows = files
                .iter()
                .map(|name| file_row(name, thumbnails.get(name)));

            Column::with_children(rows)
                .spacing(8)
                .width(Length::Fill)
                .into()
        }
    }
}

/// One display row: preview, filename, view/download actions.
fn file_row<'a>(name: &'a str, thumbnail: Option<&image::Handle>) -> Element<'a, Message> {
    let preview: Element<'a, Message> = match thumbnail {
        Some(handle) => image(handle.clone()).height(PREVIEW_HEIGHT).into(),
        None => text("📄").size(28).into(),
    };

    row![
        preview,
        text(name).width(Length::Fill),
        button("View").on_press(Message::ViewFile(name.to_owned())),
        button("Download").on_press(Message::DownloadFile(name.to_owned())),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}
