use crate::config::{OverlayConfig, PlatformCaps};
use crate::events::LoaderEvent;
use crate::sample_set::{SampleSet, TestEntry};
use crate::stopwatch::Stopwatch;

pub const LOCAL_FILE_SCHEME: &str = "file://";

/// DPI-derived multiplier for the layout constants. Computed once at startup
/// and handed to [`OverlayLayout::scaled`].
pub fn scale_factor(dpi: f32) -> f32 {
    (dpi / 100.0).floor().max(1.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    pub scale_factor: f32,
    pub bar_height: f32,
    pub button_width: f32,
    pub list_width: f32,
    pub list_item_height: f32,
    pub font_size: f32,
}

impl OverlayLayout {
    pub fn scaled(config: &OverlayConfig, scale_factor: f32) -> Self {
        Self {
            scale_factor,
            bar_height: config.bar_height * scale_factor,
            button_width: config.button_width * scale_factor,
            list_width: config.list_width * scale_factor,
            list_item_height: config.list_item_height * scale_factor,
            font_size: config.font_size * scale_factor,
        }
    }
}

/// What the overlay asked for this frame; applied by the frame loop after the
/// egui pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayActions {
    pub load_request: Option<String>,
}

/// The debug overlay controller: menu bar with URL field, sample list with
/// local/remote toggle, and the loader-event reactions that drive the
/// stopwatch and menu visibility.
pub struct Overlay {
    caps: PlatformCaps,
    layout: OverlayLayout,
    show_menu: bool,
    local_mode: bool,
    url_field: String,
    scroll_offset: f32,
    entries: Vec<TestEntry>,
    entries_local: Vec<TestEntry>,
}

impl Overlay {
    pub fn new(caps: PlatformCaps, layout: OverlayLayout) -> Self {
        Self {
            caps,
            layout,
            show_menu: !caps.suppress_overlay,
            local_mode: false,
            url_field: String::new(),
            scroll_offset: 0.0,
            entries: Vec::new(),
            entries_local: Vec::new(),
        }
    }

    pub fn layout(&self) -> &OverlayLayout {
        &self.layout
    }

    pub fn menu_visible(&self) -> bool {
        self.show_menu
    }

    pub fn local_mode(&self) -> bool {
        self.local_mode
    }

    pub fn set_local_mode(&mut self, local: bool) {
        self.local_mode = local;
    }

    pub fn url_field(&self) -> &str {
        &self.url_field
    }

    pub fn entries(&self) -> &[TestEntry] {
        &self.entries
    }

    pub fn entries_local(&self) -> &[TestEntry] {
        &self.entries_local
    }

    /// Appends one populated sample set to both entry lists, rewriting local
    /// locators with the `file://` marker when the platform asks for it.
    pub fn append_sample_set(&mut self, set: &SampleSet) {
        self.entries.extend(set.items().iter().cloned());
        if self.caps.local_file_scheme {
            for entry in set.items_local() {
                self.entries_local
                    .push(TestEntry::new(entry.label.clone(), with_local_scheme(&entry.locator)));
            }
        } else {
            self.entries_local.extend(set.items_local().iter().cloned());
        }
    }

    pub fn handle_event(&mut self, event: &LoaderEvent, stopwatch: &mut Stopwatch) {
        match event {
            LoaderEvent::UrlChanged { locator } => {
                stopwatch.start_time();
                self.url_field = locator.clone();
            }
            LoaderEvent::LoadingBegin => stopwatch.start_time(),
            LoaderEvent::LoadingEnd => {
                self.show_menu = true;
                stopwatch.stop_time();
            }
        }
    }

    fn active_entries(&self) -> &[TestEntry] {
        if self.local_mode {
            &self.entries_local
        } else {
            &self.entries
        }
    }

    /// Resolves an entry click: hides the menu so UI drawing does not distort
    /// the load timing, and returns the locator to request.
    pub fn activate_entry(&mut self, index: usize) -> Option<String> {
        let locator = self.active_entries().get(index)?.locator.clone();
        self.show_menu = false;
        Some(locator)
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> OverlayActions {
        let mut actions = OverlayActions::default();
        if !self.show_menu {
            return actions;
        }
        let layout = self.layout;

        egui::TopBottomPanel::top("url_bar").exact_height(layout.bar_height).show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let button_size = [layout.button_width, layout.bar_height - 4.0];
                let mut buttons = 1.0;
                if self.caps.native_file_dialog {
                    buttons += 1.0;
                }
                let field_width = (ui.available_width()
                    - (layout.button_width + ui.spacing().item_spacing.x) * buttons)
                    .max(0.0);
                ui.add_sized(
                    [field_width, layout.bar_height - 4.0],
                    egui::TextEdit::singleline(&mut self.url_field).hint_text("glTF URL"),
                );
                if self.caps.native_file_dialog
                    && ui.add_sized(button_size, egui::Button::new("Open")).clicked()
                {
                    let picked = rfd::FileDialog::new()
                        .add_filter("glTF", &["gltf", "glb"])
                        .pick_file();
                    if let Some(path) = picked {
                        actions.load_request = Some(format!("{LOCAL_FILE_SCHEME}{}", path.display()));
                    }
                }
                if ui.add_sized(button_size, egui::Button::new("Load")).clicked() {
                    actions.load_request = Some(self.url_field.clone());
                }
            });
        });

        egui::SidePanel::left("sample_list")
            .exact_width(layout.list_width)
            .resizable(false)
            .show(ctx, |ui| {
                let mode_label = if self.local_mode { "local" } else { "http" };
                ui.toggle_value(&mut self.local_mode, mode_label);
                ui.separator();

                let mut clicked = None;
                let output = egui::ScrollArea::vertical()
                    .vertical_scroll_offset(self.scroll_offset)
                    .show(ui, |ui| {
                        let item_width = ui.available_width();
                        for (index, entry) in self.active_entries().iter().enumerate() {
                            if ui
                                .add_sized(
                                    [item_width, layout.list_item_height],
                                    egui::Button::new(entry.label.as_str()),
                                )
                                .clicked()
                            {
                                clicked = Some(index);
                            }
                        }
                    });
                self.scroll_offset = output.state.offset.y;
                if let Some(index) = clicked {
                    if let Some(locator) = self.activate_entry(index) {
                        actions.load_request = Some(locator);
                    }
                }
            });

        actions
    }
}

fn with_local_scheme(locator: &str) -> String {
    if locator.starts_with(LOCAL_FILE_SCHEME) {
        locator.to_string()
    } else {
        format!("{LOCAL_FILE_SCHEME}{locator}")
    }
}

/// One-shot text-style pass; font sizes follow the DPI scale factor like the
/// rest of the layout.
pub fn apply_text_styles(ctx: &egui::Context, layout: &OverlayLayout) {
    let mut style: egui::Style = (*ctx.style()).clone();
    for text_style in [egui::TextStyle::Body, egui::TextStyle::Button, egui::TextStyle::Monospace] {
        if let Some(font) = style.text_styles.get_mut(&text_style) {
            font.size = layout.font_size;
        }
    }
    ctx.set_style(style);
}
