//! Nickname manager view (settings, saved nicknames, data management)

use iced::widget::button as btn;
use iced::widget::{
    Column, Space, button, checkbox, column, container, pick_list, row, scrollable, text,
    text_input,
};
use iced::{Center, Element, Fill};
use nicknames_common::{SavedNickname, Settings, affix_preview};

use crate::i18n::{t, t_args};
use crate::style::{
    BUTTON_PADDING, ELEMENT_SPACING, FORM_PADDING, INPUT_PADDING, SMALL_SPACING,
    SMALL_TEXT_SIZE, SPACER_SIZE_MEDIUM, TEXT_SIZE, TITLE_SIZE, USER_ID_WIDTH,
};
use crate::types::{FilterModeChoice, FormState, Message, PendingConfirm};

/// Build the whole manager window
pub fn settings_view<'a>(
    settings: Settings,
    saved: Vec<SavedNickname>,
    total: usize,
    form: &FormState,
) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = Vec::new();

    if let Some(pending) = form.pending {
        items.push(confirmation_panel(pending, &settings, total));
    }

    items.push(general_section(&settings));
    items.push(display_section(&settings));
    items.push(filter_section(&settings, form));
    items.push(saved_section(saved, total, form));
    items.push(data_section(total));

    let content = Column::with_children(items)
        .spacing(SPACER_SIZE_MEDIUM)
        .width(Fill);
    scrollable(container(content).padding(FORM_PADDING)).into()
}

fn section_title<'a>(title: String) -> Element<'a, Message> {
    text(title).size(TITLE_SIZE).into()
}

fn confirmation_panel<'a>(
    pending: PendingConfirm,
    settings: &Settings,
    total: usize,
) -> Element<'a, Message> {
    let (title, content, confirm_label) = match pending {
        PendingConfirm::ClearAll => (
            t("confirm-clear-all-title"),
            t_args("confirm-clear-all-content", &[("count", &total.to_string())]),
            t("button-delete-all"),
        ),
        PendingConfirm::ClearFilter => (
            t("confirm-clear-filter-title"),
            t_args(
                "confirm-clear-filter-content",
                &[
                    ("count", &settings.filtered_users.len().to_string()),
                    ("mode", settings.filter_mode.as_str()),
                ],
            ),
            t("button-clear"),
        ),
    };

    let confirm = button(text(confirm_label).size(TEXT_SIZE))
        .on_press(Message::ConfirmPressed)
        .padding(BUTTON_PADDING)
        .style(btn::danger);
    let cancel = button(text(t("button-cancel")).size(TEXT_SIZE))
        .on_press(Message::CancelConfirm)
        .padding(BUTTON_PADDING)
        .style(btn::secondary);

    column![
        section_title(title),
        text(content).size(TEXT_SIZE),
        row![confirm, cancel].spacing(ELEMENT_SPACING),
    ]
    .spacing(ELEMENT_SPACING)
    .into()
}

fn general_section<'a>(settings: &Settings) -> Element<'a, Message> {
    let enabled = checkbox(settings.enabled)
        .label(t("label-enable-nicknames"))
        .on_toggle(Message::EnabledToggled)
        .text_size(TEXT_SIZE);
    let override_server = checkbox(settings.override_server_nicks)
        .label(t("label-override-server-nicks"))
        .on_toggle(Message::OverrideServerNicksToggled)
        .text_size(TEXT_SIZE);

    column![section_title(t("section-general")), enabled, override_server]
        .spacing(ELEMENT_SPACING)
        .into()
}

fn display_section<'a>(settings: &Settings) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = vec![section_title(t("section-display"))];

    let show_prefix = checkbox(settings.show_prefix)
        .label(t("label-show-prefix"))
        .on_toggle(Message::ShowPrefixToggled)
        .text_size(TEXT_SIZE);
    items.push(show_prefix.into());

    // Affix inputs only matter while they are shown
    if settings.show_prefix {
        let prefix = text_input(&t("label-prefix"), &settings.prefix)
            .on_input(Message::PrefixChanged)
            .padding(INPUT_PADDING)
            .size(TEXT_SIZE);
        let suffix = text_input(&t("label-suffix"), &settings.suffix)
            .on_input(Message::SuffixChanged)
            .padding(INPUT_PADDING)
            .size(TEXT_SIZE);
        items.push(
            row![
                text(t("label-prefix")).size(TEXT_SIZE),
                prefix,
                text(t("label-suffix")).size(TEXT_SIZE),
                suffix,
            ]
            .spacing(ELEMENT_SPACING)
            .align_y(Center)
            .into(),
        );

        let preview = affix_preview(&settings.prefix, &settings.suffix);
        items.push(
            text(t_args("label-preview", &[("preview", &preview)]))
                .size(SMALL_TEXT_SIZE)
                .into(),
        );
    }

    Column::with_children(items).spacing(ELEMENT_SPACING).into()
}

fn filter_section<'a>(settings: &Settings, form: &FormState) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = vec![section_title(t("section-filter"))];

    let picker = pick_list(
        FilterModeChoice::all(),
        Some(FilterModeChoice(settings.filter_mode)),
        Message::FilterModeSelected,
    )
    .text_size(TEXT_SIZE);
    items.push(picker.into());

    if settings.filter_mode.is_active() {
        let mode = settings.filter_mode.as_str();
        items.push(
            text(t_args(
                "label-filter-count",
                &[
                    ("count", &settings.filtered_users.len().to_string()),
                    ("mode", mode),
                ],
            ))
            .size(SMALL_TEXT_SIZE)
            .into(),
        );

        let user_id = text_input(&t("placeholder-user-id"), &form.new_filter_user_id)
            .on_input(Message::NewFilterUserChanged)
            .on_submit(Message::AddFilteredUserPressed)
            .padding(INPUT_PADDING)
            .size(TEXT_SIZE)
            .width(Fill);
        let add = button(text(t("button-add")).size(TEXT_SIZE)).padding(BUTTON_PADDING);
        let add = if form.new_filter_user_id.trim().is_empty() {
            add
        } else {
            add.on_press(Message::AddFilteredUserPressed)
        };
        items.push(
            row![user_id, add]
                .spacing(ELEMENT_SPACING)
                .align_y(Center)
                .into(),
        );

        for user_id in &settings.filtered_users {
            let remove = button(text(t("button-delete")).size(SMALL_TEXT_SIZE))
                .on_press(Message::RemoveFilteredUser(user_id.clone()))
                .padding(INPUT_PADDING)
                .style(btn::secondary);
            items.push(
                row![text(user_id.clone()).size(TEXT_SIZE).width(Fill), remove]
                    .spacing(ELEMENT_SPACING)
                    .align_y(Center)
                    .into(),
            );
        }

        let clear = button(text(t_args("button-clear-filter", &[("mode", mode)])).size(TEXT_SIZE))
            .padding(BUTTON_PADDING)
            .style(btn::danger);
        let clear = if settings.filtered_users.is_empty() {
            clear
        } else {
            clear.on_press(Message::ClearFilterPressed)
        };
        items.push(clear.into());
    }

    Column::with_children(items).spacing(ELEMENT_SPACING).into()
}

fn saved_section<'a>(
    saved: Vec<SavedNickname>,
    total: usize,
    form: &FormState,
) -> Element<'a, Message> {
    let mut items: Vec<Element<'a, Message>> = vec![section_title(t_args(
        "section-saved",
        &[("count", &total.to_string())],
    ))];

    let search = text_input(&t("placeholder-search"), &form.search)
        .on_input(Message::SearchChanged)
        .padding(INPUT_PADDING)
        .size(TEXT_SIZE);
    items.push(search.into());

    // Add row
    let user_id = text_input(&t("placeholder-user-id"), &form.new_user_id)
        .on_input(Message::NewUserIdChanged)
        .padding(INPUT_PADDING)
        .size(TEXT_SIZE)
        .width(USER_ID_WIDTH);
    let nickname = text_input(&t("placeholder-nickname"), &form.new_nickname)
        .on_input(Message::NewNicknameChanged)
        .on_submit(Message::AddNicknamePressed)
        .padding(INPUT_PADDING)
        .size(TEXT_SIZE);
    let add = button(text(t("button-add")).size(TEXT_SIZE)).padding(BUTTON_PADDING);
    let add = if form.new_user_id.trim().is_empty() {
        add
    } else {
        add.on_press(Message::AddNicknamePressed)
    };
    items.push(
        row![user_id, nickname, add]
            .spacing(ELEMENT_SPACING)
            .align_y(Center)
            .into(),
    );

    if saved.is_empty() {
        let empty = if form.search.trim().is_empty() {
            t("empty-no-nicknames")
        } else {
            t("empty-no-results")
        };
        items.push(text(empty).size(TEXT_SIZE).into());
    } else {
        let rows: Vec<Element<'a, Message>> = saved
            .into_iter()
            .map(|entry| saved_row(entry, form))
            .collect();
        items.push(Column::with_children(rows).spacing(SMALL_SPACING).into());
    }

    Column::with_children(items).spacing(ELEMENT_SPACING).into()
}

fn saved_row<'a>(entry: SavedNickname, form: &FormState) -> Element<'a, Message> {
    let who = column![
        text(entry.label.clone()).size(TEXT_SIZE),
        text(entry.user_id.clone()).size(SMALL_TEXT_SIZE),
    ]
    .width(USER_ID_WIDTH);

    let editing = form
        .editing
        .as_ref()
        .filter(|editing| editing.user_id == entry.user_id);

    match editing {
        Some(editing) => {
            let input = text_input(&entry.label, &editing.value)
                .on_input(Message::EditChanged)
                .on_submit(Message::EditSubmitted)
                .padding(INPUT_PADDING)
                .size(TEXT_SIZE);
            let save = button(text(t("button-save")).size(TEXT_SIZE))
                .on_press(Message::EditSubmitted)
                .padding(BUTTON_PADDING);
            let cancel = button(text(t("button-cancel")).size(TEXT_SIZE))
                .on_press(Message::EditCancelled)
                .padding(BUTTON_PADDING)
                .style(btn::secondary);
            row![who, input, save, cancel]
                .spacing(ELEMENT_SPACING)
                .align_y(Center)
                .into()
        }
        None => {
            let edit = button(text(t("button-edit")).size(TEXT_SIZE))
                .on_press(Message::EditPressed(entry.user_id.clone()))
                .padding(BUTTON_PADDING)
                .style(btn::secondary);
            let delete = button(text(t("button-delete")).size(TEXT_SIZE))
                .on_press(Message::DeletePressed(entry.user_id))
                .padding(BUTTON_PADDING)
                .style(btn::danger);
            row![who, text(entry.nickname).size(TEXT_SIZE).width(Fill), edit, delete]
                .spacing(ELEMENT_SPACING)
                .align_y(Center)
                .into()
        }
    }
}

fn data_section<'a>(total: usize) -> Element<'a, Message> {
    let export = button(text(t("button-export")).size(TEXT_SIZE))
        .on_press(Message::ExportPressed)
        .padding(BUTTON_PADDING)
        .style(btn::secondary);
    let import = button(text(t("button-import")).size(TEXT_SIZE))
        .on_press(Message::ImportPressed)
        .padding(BUTTON_PADDING)
        .style(btn::secondary);
    let clear = button(text(t("button-clear-all")).size(TEXT_SIZE))
        .padding(BUTTON_PADDING)
        .style(btn::danger);
    let clear = if total == 0 {
        clear
    } else {
        clear.on_press(Message::ClearAllPressed)
    };

    column![
        section_title(t("section-data")),
        row![export, import, clear].spacing(ELEMENT_SPACING),
        Space::new().height(SPACER_SIZE_MEDIUM),
    ]
    .spacing(ELEMENT_SPACING)
    .into()
}
