//! # Read Dialog
//!
//! Label/value rows of the selected record.

use dioxus::prelude::*;
use smallcrud_schema::Record;
use smallcrud_view::{Dialog, read_rows};

use crate::components::dialogs::Modal;
use crate::components::display::DisplayCell;
use crate::state::{ScreenSetup, UiOrchestrator};

#[component]
pub fn ReadDialog(record: Option<Record>) -> Element {
    let setup = use_context::<ScreenSetup>();
    let orch = use_context::<UiOrchestrator>();
    let rows = read_rows(&setup.schema, record.as_ref());

    rsx! {
        Modal {
            title: "Detail",
            on_close: move |_| orch.close(Dialog::Read),
            table {
                class: "read-table",
                tbody {
                    for (index, row) in rows.into_iter().enumerate() {
                        tr {
                            key: "{index}",
                            th { class: "read-label", "{row.label}" }
                            td { DisplayCell { directive: row.directive } }
                        }
                    }
                }
            }
        }
    }
}
