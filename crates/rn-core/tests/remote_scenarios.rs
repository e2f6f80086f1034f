use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rn_core::{
    ContainerConfig, ElementId, ExitConfirmation, FocusDriver, FocusableConfig, HistoryNavigator,
    InputEvent, NavigationMode, RemoteNavigationController, StaticProbe,
};

/// Host double recording every call the controller makes
#[derive(Default)]
struct RecordingHost {
    focused: Vec<ElementId>,
    activated: Vec<ElementId>,
    history_depth: usize,
    go_backs: usize,
    confirms: Vec<String>,
    confirm_answer: bool,
    exits: usize,
}

impl FocusDriver for RecordingHost {
    fn focus(&mut self, id: ElementId) {
        self.focused.push(id);
    }

    fn activate(&mut self, id: ElementId) {
        self.activated.push(id);
    }
}

impl HistoryNavigator for RecordingHost {
    fn can_go_back(&self) -> bool {
        self.history_depth > 1
    }

    fn go_back(&mut self) {
        self.go_backs += 1;
        self.history_depth -= 1;
    }
}

impl ExitConfirmation for RecordingHost {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirms.push(message.to_string());
        self.confirm_answer
    }

    fn exit(&mut self) {
        self.exits += 1;
    }
}

fn right() -> InputEvent {
    InputEvent::key("ArrowRight", 39)
}

fn left() -> InputEvent {
    InputEvent::key("ArrowLeft", 37)
}

fn enter() -> InputEvent {
    InputEvent::key("Enter", 13)
}

fn back() -> InputEvent {
    InputEvent::key("GoBack", 461)
}

fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    (count, move || inner.set(inner.get() + 1))
}

#[test]
fn mode_follows_last_qualifying_event() {
    #[derive(Clone, Copy)]
    enum Step {
        Pointer,
        Arrow,
        Enter,
        Back,
        Unmapped,
    }
    const STEPS: [Step; 5] = [Step::Pointer, Step::Arrow, Step::Enter, Step::Back, Step::Unmapped];

    for initial_tv in [false, true] {
        // every sequence of length 4 over the step alphabet
        for n in 0..STEPS.len().pow(4) {
            let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(initial_tv));
            let mut host = RecordingHost {
                history_depth: 100,
                ..Default::default()
            };
            let initial = controller.mode();
            let mut expected = initial;

            let mut code = n;
            for _ in 0..4 {
                let step = STEPS[code % STEPS.len()];
                code /= STEPS.len();
                let event = match step {
                    Step::Pointer => {
                        expected = NavigationMode::Pointer;
                        InputEvent::pointer_move()
                    }
                    Step::Arrow => {
                        expected = NavigationMode::RemoteDPad;
                        InputEvent::key("ArrowUp", 38)
                    }
                    Step::Enter => enter(),
                    Step::Back => back(),
                    Step::Unmapped => InputEvent::key("KeyQ", 81),
                };
                controller.handle_input(&event, &mut host);
            }

            assert_eq!(controller.mode(), expected, "sequence #{n}, tv={initial_tv}");
        }
    }
}

#[test]
fn wrap_navigation_is_total() {
    for n in 1..6u64 {
        let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(true));
        let mut host = RecordingHost::default();
        let mut container = controller.container(ContainerConfig::new());
        let ids: Vec<ElementId> = (0..n)
            .map(|i| container.register(controller.focusable(FocusableConfig::new()), i as i32))
            .collect();
        let layer = controller.push_layer(container, &mut host);

        for (start, id) in ids.iter().enumerate() {
            let container = controller.layer_mut(layer).unwrap();
            assert!(container.focus_element(*id, &mut host));

            for _ in 0..n {
                controller.handle_input(&right(), &mut host);
            }
            assert_eq!(controller.layer(layer).unwrap().current_index(), Some(start));

            controller.handle_input(&left(), &mut host);
            controller.handle_input(&right(), &mut host);
            assert_eq!(controller.layer(layer).unwrap().current(), Some(*id));
        }
    }
}

#[test]
fn disabled_element_never_becomes_current() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(true));
    let mut host = RecordingHost::default();
    let (enter_count, on_enter) = counter();

    let mut container = controller.container(ContainerConfig::new());
    container.register(controller.focusable(FocusableConfig::new()), 0);
    let disabled = container.register(
        controller.focusable(FocusableConfig::new().on_enter(on_enter).disabled(true)),
        1,
    );
    container.register(controller.focusable(FocusableConfig::new()), 2);
    let layer = controller.push_layer(container, &mut host);

    let moves = [right(), right(), left(), InputEvent::key("ArrowDown", 40), InputEvent::key("ArrowUp", 38)];
    for round in 0..10 {
        controller.handle_input(&moves[round % moves.len()], &mut host);
        let container = controller.layer(layer).unwrap();
        assert_ne!(container.current(), Some(disabled));
        assert!(container.elements().iter().all(|e| !(e.is_disabled && e.is_current)));
        controller.handle_input(&enter(), &mut host);
    }

    assert!(!host.focused.contains(&disabled));
    assert!(!host.activated.contains(&disabled));

    // delivering events straight to the disabled binding is still inert
    let container = controller.layer_mut(layer).unwrap();
    let element = container.element_mut(disabled).unwrap();
    assert!(!element.handle_focus());
    assert!(!element.handle_action(rn_core::RemoteAction::Activate).is_handled());
    assert_eq!(enter_count.get(), 0);
}

#[test]
fn navigate_hook_has_first_refusal() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(true));
    let mut host = RecordingHost::default();
    let consume = Rc::new(Cell::new(true));
    let flag = consume.clone();

    let mut container = controller.container(ContainerConfig::new().on_navigate(move |_| flag.get()));
    container.register(controller.focusable(FocusableConfig::new()), 0);
    container.register(controller.focusable(FocusableConfig::new()), 1);
    let layer = controller.push_layer(container, &mut host);

    assert!(controller.handle_input(&right(), &mut host).is_handled());
    assert!(host.focused.is_empty());
    assert_eq!(controller.layer(layer).unwrap().current(), None);

    consume.set(false);
    controller.handle_input(&right(), &mut host);
    assert_eq!(host.focused.len(), 1);
    assert_eq!(controller.layer(layer).unwrap().current_index(), Some(0));
}

#[test]
fn back_hook_has_first_refusal() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(true));
    let mut host = RecordingHost {
        history_depth: 3,
        ..Default::default()
    };
    let consume = Rc::new(Cell::new(true));
    let flag = consume.clone();

    let container = controller.container(ContainerConfig::new().on_back(move || flag.get()));
    controller.push_layer(container, &mut host);

    controller.handle_input(&back(), &mut host);
    assert_eq!(host.go_backs, 0);
    assert!(host.confirms.is_empty());

    consume.set(false);
    controller.handle_input(&back(), &mut host);
    assert_eq!(host.go_backs, 1);
    assert!(host.confirms.is_empty());
}

#[test]
fn repeated_modality_notifies_once() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(false));
    let mut host = RecordingHost::default();
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = changes.clone();
    controller.mode_engine().subscribe_fn(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    controller.handle_input(&InputEvent::pointer_move(), &mut host);
    controller.handle_input(&InputEvent::pointer_move(), &mut host);
    assert_eq!(changes.load(Ordering::SeqCst), 0);

    controller.handle_input(&right(), &mut host);
    controller.handle_input(&right(), &mut host);
    assert_eq!(controller.mode(), NavigationMode::RemoteDPad);
    assert_eq!(changes.load(Ordering::SeqCst), 1);
}

#[test]
fn browse_row_end_to_end() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(true));
    let mut host = RecordingHost {
        history_depth: 1,
        ..Default::default()
    };
    let (a_enter, on_a_enter) = counter();

    let mut container = controller.container(ContainerConfig::new().auto_focus(true));
    let a = container.register(controller.focusable(FocusableConfig::new().on_enter(on_a_enter)), 0);
    let b = container.register(controller.focusable(FocusableConfig::new()), 1);
    let c = container.register(controller.focusable(FocusableConfig::new()), 2);
    let layer = controller.push_layer(container, &mut host);
    assert_eq!(controller.layer(layer).unwrap().current(), Some(a));

    controller.handle_input(&right(), &mut host);
    controller.handle_input(&right(), &mut host);
    assert_eq!(controller.layer(layer).unwrap().current(), Some(c));

    controller.handle_input(&right(), &mut host);
    assert_eq!(controller.layer(layer).unwrap().current(), Some(a));
    assert_eq!(host.focused, vec![a, b, c, a]);

    assert!(controller.handle_input(&enter(), &mut host).is_handled());
    assert_eq!(a_enter.get(), 1);
    assert_eq!(host.activated, vec![a]);

    assert!(controller.handle_input(&back(), &mut host).is_handled());
    assert_eq!(host.go_backs, 0);
    assert_eq!(host.confirms.len(), 1);
    assert_eq!(host.exits, 0);
}

#[test]
fn pointer_interlude_does_not_disable_remote() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(true));
    let mut host = RecordingHost::default();

    let mut container = controller.container(ContainerConfig::new().auto_focus(true));
    container.register(controller.focusable(FocusableConfig::new()), 0);
    let second = container.register(controller.focusable(FocusableConfig::new()), 1);
    let layer = controller.push_layer(container, &mut host);

    controller.handle_input(&InputEvent::pointer_move(), &mut host);
    assert_eq!(controller.mode(), NavigationMode::Pointer);

    // pointer mode swallows nothing but suppresses activation semantics
    assert!(!controller.handle_input(&enter(), &mut host).is_handled());

    controller.handle_input(&right(), &mut host);
    assert_eq!(controller.mode(), NavigationMode::RemoteDPad);
    assert_eq!(controller.layer(layer).unwrap().current(), Some(second));
}

#[test]
fn confirmed_exit_closes_app() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(true));
    let mut host = RecordingHost {
        history_depth: 1,
        confirm_answer: true,
        ..Default::default()
    };
    let container = controller.container(ContainerConfig::new());
    controller.push_layer(container, &mut host);

    controller.handle_input(&back(), &mut host);
    assert_eq!(host.exits, 1);
}

#[test]
fn top_layer_captures_keys() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(true));
    let mut host = RecordingHost::default();
    let (modal_back, on_modal_back) = counter();
    let mut on_modal_back = on_modal_back;

    let mut page = controller.container(ContainerConfig::new());
    let page_first = page.register(controller.focusable(FocusableConfig::new()), 0);
    let page_layer = controller.push_layer(page, &mut host);

    let mut modal = controller.container(ContainerConfig::new().on_back(move || {
        on_modal_back();
        true
    }));
    let modal_first = modal.register(controller.focusable(FocusableConfig::new()), 0);
    let modal_layer = controller.push_layer(modal, &mut host);

    controller.handle_input(&right(), &mut host);
    controller.handle_input(&back(), &mut host);
    assert_eq!(controller.layer(modal_layer).unwrap().current(), Some(modal_first));
    assert_eq!(controller.layer(page_layer).unwrap().current(), None);
    assert_eq!(modal_back.get(), 1);
    assert!(host.confirms.is_empty());

    controller.pop_layer(modal_layer);
    controller.handle_input(&right(), &mut host);
    assert_eq!(controller.layer(page_layer).unwrap().current(), Some(page_first));
}

#[test]
fn enter_in_pointer_mode_is_not_interpreted() {
    let mut controller = RemoteNavigationController::with_defaults(&StaticProbe(false));
    let mut host = RecordingHost::default();
    let (enter_count, on_enter) = counter();

    let mut container = controller.container(ContainerConfig::new());
    let only = container.register(controller.focusable(FocusableConfig::new().on_enter(on_enter)), 0);
    let layer = controller.push_layer(container, &mut host);
    assert!(controller.layer_mut(layer).unwrap().note_native_focus(only));

    assert!(!controller.handle_input(&enter(), &mut host).is_handled());
    assert_eq!(controller.mode(), NavigationMode::Pointer);
    assert_eq!(enter_count.get(), 0);
    assert!(host.activated.is_empty());

    // the first arrow switches to remote mode; Enter now reaches every stage
    controller.handle_input(&right(), &mut host);
    assert!(controller.handle_input(&enter(), &mut host).is_handled());
    assert_eq!(enter_count.get(), 1);
    assert_eq!(host.activated, vec![only]);
}
