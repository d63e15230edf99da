//! Stack management: show/hide bookkeeping, z-order moves, lookups.

use mullion_core::geometry::Rect;
use mullion_windows::{TextPane, Window, WindowManager, share};
use proptest::prelude::*;

fn manager() -> WindowManager {
    let wm = WindowManager::new();
    wm.set_rect(Rect::new(0, 0, 80, 24));
    wm
}

#[test]
fn show_is_idempotent() {
    let wm = manager();
    let window = Window::new();
    wm.show(&window);
    wm.show(&window);
    assert_eq!(wm.window_count(), 1);
    assert!(window.try_manager().is_some());
}

#[test]
fn show_stacks_on_top() {
    let wm = manager();
    let a = wm.new_window();
    let b = wm.new_window();
    a.show();
    b.show();
    assert_eq!(wm.get_z(&a), Some(0));
    assert_eq!(wm.get_z(&b), Some(1));
}

#[test]
fn hide_removes_but_keeps_attachment() {
    let wm = manager();
    let window = wm.new_window();
    window.show();
    window.hide();
    assert_eq!(wm.window_count(), 0);
    assert_eq!(wm.get_z(&window), None);
    // Still attached: the window can be shown again.
    window.show();
    assert_eq!(wm.window_count(), 1);
}

#[test]
fn hide_clears_modal_exclusivity() {
    let wm = manager();
    let window = wm.new_window();
    window.show_modal();
    assert!(wm.modal_window().is_some_and(|m| m.ptr_eq(&window)));
    window.hide();
    assert!(wm.modal_window().is_none());
}

#[test]
fn hiding_a_non_modal_window_keeps_the_modal() {
    let wm = manager();
    let plain = wm.new_window();
    let modal = wm.new_window();
    plain.show();
    modal.show_modal();
    plain.hide();
    assert!(wm.modal_window().is_some_and(|m| m.ptr_eq(&modal)));
}

#[test]
fn set_z_preserves_relative_order_of_others() {
    let wm = manager();
    let windows: Vec<Window> = (0..4).map(|_| wm.new_window()).collect();
    for w in &windows {
        w.show();
    }

    // Move the bottom window to index 2: [0,1,2,3] -> [1,2,0,3].
    wm.set_z(&windows[0], 2);
    assert_eq!(wm.get_z(&windows[1]), Some(0));
    assert_eq!(wm.get_z(&windows[2]), Some(1));
    assert_eq!(wm.get_z(&windows[0]), Some(2));
    assert_eq!(wm.get_z(&windows[3]), Some(3));
}

#[test]
fn set_z_out_of_range_clamps_to_top() {
    let wm = manager();
    let a = wm.new_window();
    let b = wm.new_window();
    let c = wm.new_window();
    a.show();
    b.show();
    c.show();

    wm.set_z(&a, 99);
    assert_eq!(wm.get_z(&a), Some(2));
    wm.raise(&b);
    assert_eq!(wm.get_z(&b), Some(2));
    assert_eq!(wm.get_z(&a), Some(1));
}

#[test]
fn set_z_on_unshown_window_is_a_noop() {
    let wm = manager();
    let shown = wm.new_window();
    shown.show();
    let stray = wm.new_window();
    wm.set_z(&stray, 0);
    assert_eq!(wm.window_count(), 1);
    assert_eq!(wm.get_z(&stray), None);
}

#[test]
fn window_at_is_bounds_checked() {
    let wm = manager();
    assert!(wm.window_at(0).is_none());
    let window = wm.new_window();
    window.show();
    assert!(wm.window_at(0).is_some_and(|w| w.ptr_eq(&window)));
    assert!(wm.window_at(1).is_none());
}

#[test]
fn find_pane_resolves_the_hosting_window() {
    let wm = manager();
    let a = wm.new_window();
    let b = wm.new_window();
    let hosted = b.host(TextPane::new("hello"));
    a.show();
    b.show();

    assert!(wm.find_pane(&hosted).is_some_and(|w| w.ptr_eq(&b)));

    let unhosted = share(TextPane::new("stray"));
    assert!(wm.find_pane(&unhosted).is_none());
}

proptest! {
    /// Random show/hide/set_z sequences keep the stack duplicate-free and
    /// identical to a simple reference model.
    #[test]
    fn stack_matches_reference_model(
        ops in proptest::collection::vec((0..3u8, 0..6usize, 0..8usize), 0..40)
    ) {
        let wm = manager();
        let windows: Vec<Window> = (0..6).map(|_| wm.new_window()).collect();
        let mut model: Vec<usize> = Vec::new();

        for (op, i, z) in ops {
            match op {
                0 => {
                    wm.show(&windows[i]);
                    if !model.contains(&i) {
                        model.push(i);
                    }
                }
                1 => {
                    wm.hide(&windows[i]);
                    model.retain(|&m| m != i);
                }
                _ => {
                    wm.set_z(&windows[i], z);
                    if let Some(pos) = model.iter().position(|&m| m == i) {
                        model.remove(pos);
                        let target = z.min(model.len());
                        model.insert(target, i);
                    }
                }
            }

            prop_assert_eq!(wm.window_count(), model.len());
            for (idx, &wi) in model.iter().enumerate() {
                let at = wm.window_at(idx);
                prop_assert!(at.is_some_and(|w| w.ptr_eq(&windows[wi])));
            }
        }
    }
}
