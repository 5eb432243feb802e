use egui::{Align2, Area, Frame, Margin, RichText, Stroke};
use linkup_business::Notices;
use linkup_states::StateCtx;

use crate::utils::colors::notice_level;

/// Stack of notices in the bottom-right corner, each with a dismiss button.
pub fn notices(state_ctx: &mut StateCtx, ctx: &egui::Context) {
    let notices = state_ctx.state::<Notices>();
    if notices.is_empty() {
        return;
    }
    let items: Vec<_> = notices.iter().cloned().collect();
    let mut dismissed = None;

    Area::new(egui::Id::new("notices"))
        .anchor(Align2::RIGHT_BOTTOM, [-12.0, -12.0])
        .show(ctx, |ui| {
            for notice in &items {
                let color = notice_level(notice.level);
                Frame::popup(ui.style())
                    .stroke(Stroke::new(1.0, color))
                    .inner_margin(Margin::symmetric(10, 6))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&notice.message).color(color));
                            if ui.small_button("✕").clicked() {
                                dismissed = Some(notice.id);
                            }
                        });
                    });
                ui.add_space(4.0);
            }
        });

    if let Some(id) = dismissed {
        state_ctx.update::<Notices>(|notices| notices.dismiss(id));
    }
}
