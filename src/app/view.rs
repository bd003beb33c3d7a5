use super::messages::Message;
use super::state::{
    App, GALLERY_SCROLL_ID, GRID_PADDING_PX, GRID_SPACING_PX, SENTINEL_HEIGHT_PX,
};
use crate::theme::Theme;
use gallery_core::cat_api::CatImage;
use gallery_core::slots::Slot;
use iced::alignment::Vertical;
use iced::widget::{Space, column, container, horizontal_space, mouse_area, row, scrollable, text};
use iced::{Background, Border, Color, Element, Length};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let theme = Theme::from(self.config.theme);
        let layout = self.grid_layout();

        let mut grid = column![].spacing(GRID_SPACING_PX);
        for chunk in self.gallery.slots.as_slice().chunks(layout.columns) {
            let mut tiles = row![].spacing(GRID_SPACING_PX);
            for slot in chunk {
                tiles = tiles.push(self.tile_view(slot, theme));
            }
            for _ in chunk.len()..layout.columns {
                tiles = tiles.push(Space::new(
                    Length::FillPortion(1),
                    Length::Fixed(self.config.tile_height),
                ));
            }
            grid = grid.push(tiles);
        }
        grid = grid.push(Space::new(Length::Fill, Length::Fixed(SENTINEL_HEIGHT_PX)));

        let gallery = scrollable(container(grid).width(Length::Fill).padding(GRID_PADDING_PX))
            .on_scroll(|viewport| Message::Scrolled {
                scroll_top: viewport.absolute_offset().y,
                viewport_width: viewport.bounds().width,
                viewport_height: viewport.bounds().height,
            })
            .id(GALLERY_SCROLL_ID.clone())
            .height(Length::Fill);

        column![self.header_view()]
            .push_maybe(self.error_view(theme))
            .push(gallery)
            .into()
    }

    fn header_view(&self) -> Element<'_, Message> {
        let slots = &self.gallery.slots;
        let mut status = format!("{} loaded", slots.loaded_len());
        if slots.placeholder_len() > 0 {
            status.push_str(&format!(", {} pending", slots.placeholder_len()));
        }
        if self.gallery.controller.is_busy() {
            status.push_str(" | loading");
        }

        row![
            text("Cat Gallery").size(22),
            horizontal_space(),
            text(status).size(14),
            text(format!("{} more | {} quit", self.config.key_load_more, self.config.key_quit))
                .size(12),
        ]
        .spacing(16)
        .padding([12, 16])
        .align_y(Vertical::Center)
        .into()
    }

    fn error_view(&self, theme: Theme) -> Option<Element<'_, Message>> {
        let banner = self.error.as_ref()?;
        let fill = theme.error_banner();
        let content = container(text(banner.message.as_str()).size(14))
            .width(Length::Fill)
            .padding([8, 16])
            .style(move |_| container::Style {
                background: Some(Background::Color(fill)),
                ..container::Style::default()
            });
        Some(mouse_area(content).on_press(Message::DismissError).into())
    }

    fn tile_view<'a>(&'a self, slot: &'a Slot<CatImage>, theme: Theme) -> Element<'a, Message> {
        let (fill, content): (Color, Element<'a, Message>) = match slot {
            Slot::Placeholder => (theme.skeleton(), Space::new(Length::Fill, Length::Fill).into()),
            Slot::Loaded(image) => (theme.card(), Self::image_card(image)),
        };
        let border = theme.card_border();

        container(content)
            .width(Length::FillPortion(1))
            .height(Length::Fixed(self.config.tile_height))
            .padding(12)
            .clip(true)
            .style(move |_| container::Style {
                background: Some(Background::Color(fill)),
                border: Border {
                    color: border,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..container::Style::default()
            })
            .into()
    }

    fn image_card(image: &CatImage) -> Element<'_, Message> {
        let size = match image.dimensions() {
            Some((width, height)) => format!("{width} x {height}"),
            None => "size unknown".to_string(),
        };
        let breed = image
            .primary_breed()
            .map(|breed| breed.name.as_str())
            .unwrap_or("Unknown breed");

        column![
            text(image.id.as_str()).size(16),
            text(breed).size(14),
            text(size).size(12),
            text(image.url.as_str()).size(11),
        ]
        .spacing(6)
        .into()
    }
}
