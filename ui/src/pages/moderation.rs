//! Verification queue and feedback inbox.

use egui::{RichText, Ui};
use linkup_business::{
    Route,
    error::RenderError,
    records::{Feedback, FeedbackField, ReadState, Verification, VerificationField},
    tables::{FeedbackTable, Table, VerificationsTable},
};
use linkup_states::Time;

use crate::{
    format,
    state::{Dialog, State},
    utils::colors,
    widgets::{ColumnDef, RowAction, apply, filters, record_table},
};

const VERIFICATION_STATUSES: [(&str, &str); 3] = [
    ("pending", "Pending"),
    ("approved", "Approved"),
    ("denied", "Denied"),
];

const PLATFORMS: [(&str, &str); 3] = [("iOS", "iOS"), ("Android", "Android"), ("Web", "Web")];

const READ_STATES: [(&str, &str); 2] = [("unread", "Unread"), ("read", "Read")];

fn applicant_cell(verification: &Verification, ui: &mut Ui) -> Option<RowAction> {
    ui.link(&verification.user_name)
        .clicked()
        .then(|| RowAction::Open(Route::UserDetail(verification.user_id)))
}

fn document_cell(verification: &Verification, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&verification.document);
    None
}

fn submitted_cell(verification: &Verification, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format::date(verification.submitted_at));
    None
}

fn reviewed_cell(verification: &Verification, ui: &mut Ui) -> Option<RowAction> {
    let text = match (&verification.reviewer, verification.reviewed_at) {
        (Some(reviewer), Some(at)) => format!("{} by {reviewer}", format::date(at)),
        _ => format::maybe_date(verification.reviewed_at),
    };
    let response = ui.label(text);
    if let Some(note) = &verification.note {
        response.on_hover_text(note);
    }
    None
}

fn verification_status_cell(verification: &Verification, ui: &mut Ui) -> Option<RowAction> {
    ui.label(
        RichText::new(verification.status.label())
            .color(colors::verification_status(verification.status)),
    );
    None
}

fn review_cell(verification: &Verification, ui: &mut Ui) -> Option<RowAction> {
    ui.button("Review")
        .clicked()
        .then(|| RowAction::Dialog(Dialog::Review(verification.id)))
}

pub fn verifications_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading(VerificationsTable::TITLE);
    let now = state.ctx.state::<Time>().now();
    let columns = [
        ColumnDef::sorted("User", VerificationField::UserName, applicant_cell),
        ColumnDef::sorted("Document", VerificationField::Document, document_cell),
        ColumnDef::sorted("Submitted", VerificationField::SubmittedAt, submitted_cell),
        ColumnDef::sorted("Reviewed", VerificationField::ReviewedAt, reviewed_cell),
        ColumnDef::sorted("Status", VerificationField::Status, verification_status_cell),
        ColumnDef::plain("", review_cell),
    ];

    let action = record_table::<VerificationsTable>(&mut state.ctx, ui, &columns, |ui, edited| {
        filters::search_box(ui, edited);
        filters::selection_filter(
            ui,
            edited,
            "Status",
            VerificationField::Status,
            &VERIFICATION_STATUSES,
        );
        filters::date_filter(ui, edited, "Submitted", VerificationField::SubmittedAt, now);
        filters::clear_filters(ui, edited);
    });
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}

fn author_cell(feedback: &Feedback, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&feedback.user_name);
    None
}

fn category_cell(feedback: &Feedback, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&feedback.category);
    None
}

fn platform_cell(feedback: &Feedback, ui: &mut Ui) -> Option<RowAction> {
    ui.label(&feedback.platform);
    None
}

fn message_cell(feedback: &Feedback, ui: &mut Ui) -> Option<RowAction> {
    let short: String = feedback.message.chars().take(60).collect();
    let response = ui.label(short);
    if feedback.message.chars().count() > 60 {
        response.on_hover_text(&feedback.message);
    }
    None
}

fn rating_cell(feedback: &Feedback, ui: &mut Ui) -> Option<RowAction> {
    let stars = usize::from(feedback.rating.min(5));
    ui.label(format!("{}{}", "★".repeat(stars), "☆".repeat(5 - stars)));
    None
}

fn feedback_submitted_cell(feedback: &Feedback, ui: &mut Ui) -> Option<RowAction> {
    ui.label(format::date(feedback.submitted_at));
    None
}

fn feedback_read_cell(feedback: &Feedback, ui: &mut Ui) -> Option<RowAction> {
    ui.label(RichText::new(feedback.read.label()).color(colors::read_state(feedback.read)));
    match feedback.read {
        ReadState::Unread => ui
            .small_button("Mark read")
            .clicked()
            .then_some(RowAction::MarkFeedbackRead(feedback.id)),
        ReadState::Read => None,
    }
}

pub fn feedback_page(state: &mut State, ui: &mut Ui) -> Result<(), RenderError> {
    ui.heading(FeedbackTable::TITLE);
    let now = state.ctx.state::<Time>().now();
    let columns = [
        ColumnDef::sorted("From", FeedbackField::UserName, author_cell),
        ColumnDef::sorted("Category", FeedbackField::Category, category_cell),
        ColumnDef::sorted("Platform", FeedbackField::Platform, platform_cell),
        ColumnDef::sorted("Message", FeedbackField::Message, message_cell),
        ColumnDef::sorted("Rating", FeedbackField::Rating, rating_cell),
        ColumnDef::sorted("Submitted", FeedbackField::SubmittedAt, feedback_submitted_cell),
        ColumnDef::sorted("Status", FeedbackField::Read, feedback_read_cell),
    ];

    let action = record_table::<FeedbackTable>(&mut state.ctx, ui, &columns, |ui, edited| {
        filters::search_box(ui, edited);
        filters::selection_filter(ui, edited, "Platform", FeedbackField::Platform, &PLATFORMS);
        filters::selection_filter(ui, edited, "Status", FeedbackField::Read, &READ_STATES);
        filters::range_filter(ui, edited, "Rating", FeedbackField::Rating);
        filters::date_filter(ui, edited, "Submitted", FeedbackField::SubmittedAt, now);
        filters::clear_filters(ui, edited);
    });
    if let Some(action) = action {
        apply(state, action);
    }
    Ok(())
}
