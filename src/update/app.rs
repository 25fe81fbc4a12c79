//! App message handlers (loading, quit)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::{PendingOp, SheetModel};

/// Handle app messages
pub fn update_app(model: &mut SheetModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Reload => {
            let ticket = model.begin(PendingOp::Load);
            model.ui.is_loading = true;
            model.ui.set_status("Loading...");
            Some(Cmd::LoadItems { ticket })
        }

        AppMsg::Quit => Some(Cmd::Quit),
    }
}
