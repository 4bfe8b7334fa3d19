//! # Search Table Component
//!
//! Renders the schema's `SearchTable`: sortable headers, display cells, the
//! operations column and the pager. Deletes wait for the confirm dialog.

use dioxus::prelude::*;
use smallcrud_core::SortOrder;
use smallcrud_schema::{Query, Record};
use smallcrud_view::table::OPERATIONS_LABEL;
use smallcrud_view::{RowAction, SearchTable, StateHandle, TableEvent, page_count};

use crate::components::dialogs::ConfirmDeleteDialog;
use crate::components::display::DisplayCell;
use crate::state::{ScreenSetup, SignalState, UiOrchestrator};

/// Next order when a header is clicked: none, ascending, descending, none
pub fn next_sort_order(current: Option<SortOrder>) -> Option<SortOrder> {
    match current {
        None => Some(SortOrder::Ascending),
        Some(SortOrder::Ascending) => Some(SortOrder::Descending),
        Some(SortOrder::Descending) => None,
    }
}

/// Current 1-based page index of a query
pub fn current_page(query: &Query, page_size: u64) -> u64 {
    match &query.page {
        Some(page) if page.limit > 0 => page.offset / page.limit + 1,
        Some(page) => page.offset / page_size.max(1) + 1,
        None => 1,
    }
}

fn sort_indicator(order: Option<SortOrder>) -> &'static str {
    match order {
        Some(SortOrder::Ascending) => " ▲",
        Some(SortOrder::Descending) => " ▼",
        None => "",
    }
}

/// The list of records with its pager
#[component]
pub fn CrudTable() -> Element {
    let setup = use_context::<ScreenSetup>();
    let orch = use_context::<UiOrchestrator>();
    let state = use_context::<SignalState>();
    let mut grid = use_signal(|| SearchTable::new(setup.schema.clone()));
    use_context_provider(|| grid);

    let dispatch = use_callback(move |event: Option<TableEvent>| {
        if let Some(event) = event {
            let orch = orch.clone();
            spawn(async move { orch.handle(event).await });
        }
    });

    let snapshot = state.snapshot();
    let columns = grid.read().columns();
    let rows = snapshot.page().data.clone();
    let sort = snapshot.query().sort.clone().unwrap_or_default();
    let page_size = setup.page_size();
    let pages = page_count(snapshot.page().count, page_size);
    let page = current_page(snapshot.query(), page_size);
    let loading = snapshot.is_loading();
    let pending = grid.read().pending_delete().cloned();
    let span = columns.len() + 1;

    rsx! {
        div {
            class: "table-wrapper",
            class: if loading { "is-loading" } else { "" },
            table {
                class: "crud-table",
                thead {
                    tr {
                        {columns.iter().map(|column| {
                            let name = column.name.clone();
                            let active = sort.name.as_deref() == Some(column.name.as_str());
                            let order = if active { sort.order } else { None };
                            let sortable = column.sortable;
                            rsx! {
                                th {
                                    key: "{column.name}",
                                    class: if sortable { "sortable" } else { "" },
                                    onclick: move |_| {
                                        if sortable {
                                            let event = grid.read().sort_change(&name, next_sort_order(order));
                                            dispatch.call(event);
                                        }
                                    },
                                    "{column.label}{sort_indicator(order)}"
                                }
                            }
                        })}
                        th { class: "operations", "{OPERATIONS_LABEL}" }
                    }
                }
                tbody {
                    if rows.is_empty() {
                        tr {
                            td { colspan: "{span}", class: "empty", "No data" }
                        }
                    }
                    for (index, record) in rows.into_iter().enumerate() {
                        TableRow { key: "{index}", record, on_event: dispatch }
                    }
                }
            }
            Pager {
                page,
                pages,
                on_page: move |index: u64| {
                    let event = grid.read().page_change(index, page_size);
                    dispatch.call(Some(event));
                },
            }
        }

        if let Some(record) = pending {
            ConfirmDeleteDialog {
                record,
                on_confirm: move |_| {
                    let event = grid.write().confirm_delete();
                    dispatch.call(event);
                },
                on_cancel: move |_| grid.write().decline_delete(),
            }
        }
    }
}

// ============================================================================
// Rows
// ============================================================================

#[derive(Props, Clone, PartialEq)]
struct TableRowProps {
    record: Record,
    on_event: EventHandler<Option<TableEvent>>,
}

#[component]
fn TableRow(props: TableRowProps) -> Element {
    let mut grid = use_context::<Signal<SearchTable>>();
    let cells = grid.read().cells(&props.record);
    let on_event = props.on_event;
    let record = props.record;

    rsx! {
        tr {
            class: "crud-row",
            onclick: {
                let record = record.clone();
                move |_| on_event.call(Some(grid.read().row_click(&record)))
            },
            for (index, directive) in cells.into_iter().enumerate() {
                td { key: "{index}", DisplayCell { directive } }
            }
            td {
                class: "operations",
                {RowAction::all().iter().copied().map(|action| {
                    let record = record.clone();
                    let class = if action == RowAction::Delete {
                        "btn btn-small btn-danger"
                    } else {
                        "btn btn-small"
                    };
                    rsx! {
                        button {
                            key: "{action.display_name()}",
                            r#type: "button",
                            class,
                            onclick: move |evt: MouseEvent| {
                                evt.stop_propagation();
                                let event = grid.write().action(action, &record);
                                on_event.call(event);
                            },
                            "{action.display_name()}"
                        }
                    }
                })}
            }
        }
    }
}

// ============================================================================
// Pager
// ============================================================================

#[component]
fn Pager(page: u64, pages: u64, on_page: EventHandler<u64>) -> Element {
    if pages <= 1 {
        return rsx! {};
    }
    rsx! {
        div {
            class: "pager",
            button {
                r#type: "button",
                class: "btn btn-small",
                disabled: page <= 1,
                onclick: move |_| on_page.call(page.saturating_sub(1).max(1)),
                "‹"
            }
            span { class: "pager-status", "{page} / {pages}" }
            button {
                r#type: "button",
                class: "btn btn-small",
                disabled: page >= pages,
                onclick: move |_| on_page.call(page + 1),
                "›"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallcrud_schema::PageSpec;

    #[test]
    fn test_sort_cycle() {
        assert_eq!(next_sort_order(None), Some(SortOrder::Ascending));
        assert_eq!(
            next_sort_order(Some(SortOrder::Ascending)),
            Some(SortOrder::Descending)
        );
        assert_eq!(next_sort_order(Some(SortOrder::Descending)), None);
    }

    #[test]
    fn test_current_page() {
        assert_eq!(current_page(&Query::new(), 20), 1);
        let query = Query::new().with_page(PageSpec::for_page(3, 20));
        assert_eq!(current_page(&query, 20), 3);
    }
}
