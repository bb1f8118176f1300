use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use super::board::build_board_grid;
use super::hud::{update_result, update_subtitle};
use super::state::{AppState, BOARD_COLUMNS};

pub(super) fn rebuild_board(state: &Rc<RefCell<AppState>>) {
    let (board_container, grid_rows) = {
        let st = state.borrow();
        (st.board_container.clone(), st.grid_rows())
    };
    let Some(board_container) = board_container else {
        return;
    };

    while let Some(child) = board_container.first_child() {
        board_container.remove(&child);
    }
    let grid = build_board_grid(state);
    let grid_ratio = if grid_rows > 0 {
        BOARD_COLUMNS as f32 / grid_rows as f32
    } else {
        1.0
    };
    let grid_frame = gtk::AspectFrame::new(0.5, 0.5, grid_ratio, false);
    grid_frame.set_halign(gtk::Align::Fill);
    grid_frame.set_valign(gtk::Align::Fill);
    grid_frame.set_hexpand(true);
    grid_frame.set_vexpand(true);
    grid_frame.set_child(Some(&grid));
    board_container.append(&grid_frame);
}

pub(super) fn show_loading(state: &Rc<RefCell<AppState>>) {
    let st = state.borrow();
    update_subtitle(&st);
    if let Some(restart) = &st.restart_button {
        restart.set_sensitive(false);
    }
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::Crossfade);
        stack.set_visible_child_name("loading");
    }
}

pub(super) fn show_game(state: &Rc<RefCell<AppState>>) {
    rebuild_board(state);
    let st = state.borrow();
    update_subtitle(&st);
    update_result(&st);
    if let Some(restart) = &st.restart_button {
        restart.set_sensitive(true);
    }
    if let Some(stack) = &st.view_stack {
        stack.set_transition_type(gtk::StackTransitionType::SlideLeft);
        stack.set_visible_child_name("game");
    }
}
