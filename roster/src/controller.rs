//! [`Controller`] of the users view.

use std::{
    cell::{Ref, RefCell, RefMut},
    collections::HashSet,
    time::Instant,
};

use common::{
    pagination::{Mode, Window},
    Debounce,
};
use tracing as log;

use crate::{
    domain::{user, User},
    form::{Draft, Form},
    infra::remote::{self, raw},
    notification::{self, Notification, Severity},
    read::user::list::{self, Filter, Key, PageSize, Search, Sort, View},
    Config,
};

#[cfg(doc)]
use crate::{command, Command};

/// State machine owning the canonical collection of [`User`]s along with all
/// the transient view parameters.
///
/// Synchronous transitions are exposed as methods, while the ones awaiting a
/// [`Remote`] record service are [`Command`]s (see the [`command`] module).
/// Every read of [`Controller::view()`] recomputes the rendered rows from the
/// latest state.
///
/// [`Remote`]: remote::Remote
#[derive(Debug)]
pub struct Controller<R> {
    /// [`Config`] of this [`Controller`].
    config: Config,

    /// [`Remote`] record service of this [`Controller`].
    ///
    /// [`Remote`]: remote::Remote
    remote: R,

    /// Mutable [`State`] of this [`Controller`].
    state: RefCell<State>,
}

impl<R> Controller<R> {
    /// Creates a new [`Controller`] with an empty collection.
    #[must_use]
    pub fn new(config: Config, remote: R) -> Self {
        Self {
            state: RefCell::new(State::new(&config)),
            config,
            remote,
        }
    }

    /// Returns [`Config`] of this [`Controller`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Remote`] record service of this [`Controller`].
    ///
    /// [`Remote`]: remote::Remote
    #[must_use]
    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Borrows [`State`] of this [`Controller`] for a transition.
    ///
    /// Must never be held across an `.await` point.
    pub(crate) fn state(&self) -> RefMut<'_, State> {
        self.state.borrow_mut()
    }

    /// Borrows [`State`] of this [`Controller`] for reading.
    fn read(&self) -> Ref<'_, State> {
        self.state.borrow()
    }

    /// Returns the rendered [`View`], or [`None`] while the collection is
    /// being loaded.
    #[must_use]
    pub fn view(&self) -> Option<View> {
        self.read().view()
    }

    /// Indicates whether the collection is being loaded.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    /// Returns the message of the latest failure, unless superseded by a newer
    /// operation.
    #[must_use]
    pub fn banner(&self) -> Option<String> {
        self.read().banner.clone()
    }

    /// Returns a snapshot of the canonical collection of [`User`]s.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.read().users.clone()
    }

    /// Stages the provided search `text`, activating it once no newer input
    /// arrives within the debounce period.
    pub fn input_search(&self, text: impl Into<String>, now: Instant) {
        let mut state = self.state();
        let text = text.into();
        state.debounce.schedule(Search::from(text.clone()), now);
        state.search_input = text;
    }

    /// Returns the staged search text, as entered.
    #[must_use]
    pub fn search_input(&self) -> String {
        self.read().search_input.clone()
    }

    /// Returns the [`Instant`] the staged search text becomes active at.
    #[must_use]
    pub fn search_deadline(&self) -> Option<Instant> {
        self.read().debounce.deadline()
    }

    /// Activates the staged search text if its debounce period has passed by
    /// `now`, resetting the window.
    ///
    /// Returns `false` if nothing has changed.
    pub fn tick(&self, now: Instant) -> bool {
        let mut state = self.state();
        let Some(search) = state.debounce.fire(now) else {
            return false;
        };
        log::debug!("search `{search}` activated");
        state.search = search;
        state.reset_window();
        true
    }

    /// Returns the active [`Search`].
    #[must_use]
    pub fn search(&self) -> Search {
        self.read().search.clone()
    }

    /// Opens the filter editor, returning the applied [`Filter`] as its
    /// initial values.
    pub fn open_filters(&self) -> Filter {
        let mut state = self.state();
        state.filters_open = true;
        state.filter.clone()
    }

    /// Closes the filter editor without applying anything.
    pub fn close_filters(&self) {
        self.state().filters_open = false;
    }

    /// Indicates whether the filter editor is open.
    #[must_use]
    pub fn filters_open(&self) -> bool {
        self.read().filters_open
    }

    /// Replaces the applied [`Filter`], closing the filter editor and resetting
    /// the window.
    pub fn apply_filters(&self, filter: Filter) {
        let mut state = self.state();
        log::debug!("filter applied: {filter:?}");
        state.filter = filter;
        state.filters_open = false;
        state.reset_window();
    }

    /// Returns the applied [`Filter`].
    #[must_use]
    pub fn filter(&self) -> Filter {
        self.read().filter.clone()
    }

    /// Selects the [`Key`] to order by, flipping the order if it's active
    /// already, and resets the window.
    pub fn toggle_sort(&self, key: Key) {
        let mut state = self.state();
        state.sort.toggle(key);
        log::debug!("sorted by `{}` {:?}", state.sort.key, state.sort.order);
        state.reset_window();
    }

    /// Returns the active [`Sort`].
    #[must_use]
    pub fn sort(&self) -> Sort {
        self.read().sort
    }

    /// Requests the provided page, out-of-range pages being clamped on
    /// rendering.
    ///
    /// Returns `false` if not in [`Mode::Paged`].
    pub fn set_page(&self, page: usize) -> bool {
        self.state().window.request_page(page)
    }

    /// Moves to the next page, if there is any.
    pub fn next_page(&self) -> bool {
        let mut state = self.state();
        let (total, size) = (state.total(), state.page_size.get());
        state.window.next_page(total, size)
    }

    /// Moves to the previous page, if there is any.
    pub fn previous_page(&self) -> bool {
        let mut state = self.state();
        let (total, size) = (state.total(), state.page_size.get());
        state.window.previous_page(total, size)
    }

    /// Changes the [`PageSize`], resetting the window.
    pub fn set_page_size(&self, page_size: PageSize) {
        let mut state = self.state();
        state.page_size = page_size;
        state.reset_window();
    }

    /// Returns the active [`PageSize`].
    #[must_use]
    pub fn page_size(&self) -> PageSize {
        self.read().page_size
    }

    /// Switches the windowing [`Mode`], resetting the window.
    ///
    /// Returns `false` if the [`Mode`] is active already.
    pub fn set_mode(&self, mode: Mode) -> bool {
        let mut state = self.state();
        let size = state.page_size.get();
        let switched = state.window.switch(mode, size);
        if switched {
            log::debug!("window mode switched to `{mode}`");
        }
        switched
    }

    /// Returns the active windowing [`Mode`].
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.read().window.mode()
    }

    /// Grows the window by a page once the end of the rendered rows is near.
    ///
    /// Returns `false` if not in [`Mode::Growing`] or everything is rendered
    /// already, so it's safe to signal repeatedly.
    pub fn advance(&self) -> bool {
        let mut state = self.state();
        let (total, size) = (state.total(), state.page_size.get());
        state.window.advance(total, size)
    }

    /// Opens the user form for creating a new [`User`], returning its initial
    /// values.
    pub fn open_create(&self) -> Draft {
        self.state().form = Form::Create;
        Draft::default()
    }

    /// Opens the user form for editing the [`User`] with the provided
    /// [`user::Id`], returning its current values.
    pub fn open_edit(&self, id: user::Id) -> Draft {
        let mut state = self.state();
        state.form = Form::Edit(id);
        state
            .user(id)
            .map(|u| Draft::from(u.fields()))
            .unwrap_or_default()
    }

    /// Closes the user form.
    pub fn close_form(&self) {
        self.state().form = Form::Closed;
    }

    /// Returns the state of the user [`Form`].
    #[must_use]
    pub fn form(&self) -> Form {
        self.read().form
    }

    /// Indicates whether a creation or an update is in flight.
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.read().submitting
    }

    /// Stages deletion of the [`User`] with the provided [`user::Id`],
    /// returning the prompt to confirm it with.
    ///
    /// Deletion happens once [`command::DeleteUser`] is executed for the same
    /// [`user::Id`].
    pub fn request_delete(&self, id: user::Id) -> String {
        self.state().pending_delete = Some(id);
        format!("Delete user #{id}?")
    }

    /// Discards the staged deletion (if any).
    pub fn cancel_delete(&self) {
        self.state().pending_delete = None;
    }

    /// Returns the [`Notification`]s not dismissed yet.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.read().notifications.items().to_vec()
    }

    /// Dismisses the [`Notification`] with the provided ID.
    pub fn dismiss(&self, id: notification::Id) -> bool {
        self.state().notifications.dismiss(id)
    }

    /// Abandons every in-flight request: their responses will be discarded.
    pub fn teardown(&self) {
        self.state().teardown();
    }
}

/// Marker of the state a request was issued in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticket {
    /// Epoch bumped on every teardown.
    epoch: u64,

    /// Generation bumped on every load.
    load: u64,
}

/// Mutable state of a [`Controller`].
#[derive(Debug)]
pub(crate) struct State {
    /// Canonical collection of [`User`]s.
    pub(crate) users: Vec<User>,

    /// Indicator whether the collection is being loaded.
    pub(crate) loading: bool,

    /// Current [`Ticket`].
    ticket: Ticket,

    /// Search text as entered.
    search_input: String,

    /// Active [`Search`].
    search: Search,

    /// Entered [`Search`] awaiting its activation.
    debounce: Debounce<Search>,

    /// Applied [`Filter`].
    filter: Filter,

    /// Indicator whether the filter editor is open.
    filters_open: bool,

    /// Active [`Sort`].
    sort: Sort,

    /// Active [`PageSize`].
    page_size: PageSize,

    /// [`Window`] over the selected [`User`]s.
    window: Window,

    /// State of the user [`Form`].
    pub(crate) form: Form,

    /// Indicator whether a creation or an update is in flight.
    pub(crate) submitting: bool,

    /// [`user::Id`] of the [`User`] whose deletion is staged.
    pub(crate) pending_delete: Option<user::Id>,

    /// Message of the latest failure.
    pub(crate) banner: Option<String>,

    /// Emitted [`Notification`]s.
    notifications: notification::Queue,
}

impl State {
    /// Creates a new initial [`State`].
    fn new(config: &Config) -> Self {
        Self {
            users: Vec::new(),
            loading: false,
            ticket: Ticket { epoch: 0, load: 0 },
            search_input: String::new(),
            search: Search::default(),
            debounce: Debounce::new(config.debounce),
            filter: Filter::default(),
            filters_open: false,
            sort: Sort::default(),
            page_size: config.page_size,
            window: Window::new(config.mode, config.page_size.get()),
            form: Form::Closed,
            submitting: false,
            pending_delete: None,
            banner: None,
            notifications: notification::Queue::new(
                config.notification_duration,
            ),
        }
    }

    /// Returns the current [`Ticket`].
    pub(crate) fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Starts a new load, superseding any in-flight one.
    pub(crate) fn begin_load(&mut self) -> Ticket {
        self.ticket.load += 1;
        self.loading = true;
        self.banner = None;
        self.ticket
    }

    /// Starts a new creation or update.
    pub(crate) fn begin_submit(&mut self) -> Ticket {
        self.submitting = true;
        self.banner = None;
        self.ticket
    }

    /// Checks whether a load issued with the provided [`Ticket`] is the
    /// latest one and wasn't torn down.
    pub(crate) fn is_current_load(&self, ticket: Ticket) -> bool {
        self.ticket == ticket
    }

    /// Checks whether a mutation issued with the provided [`Ticket`] wasn't
    /// torn down.
    pub(crate) fn is_current(&self, ticket: Ticket) -> bool {
        self.ticket.epoch == ticket.epoch
    }

    /// Abandons every in-flight request.
    fn teardown(&mut self) {
        self.ticket.epoch += 1;
        self.ticket.load += 1;
        self.loading = false;
        self.submitting = false;
        _ = self.debounce.cancel();
        log::debug!("in-flight requests abandoned");
    }

    /// Populates the collection with the provided normalized raw records.
    ///
    /// Records without an ID get a fresh one, while records repeating an
    /// already seen ID are dropped.
    pub(crate) fn populate(&mut self, records: Vec<raw::User>) -> usize {
        let mut next = records
            .iter()
            .filter_map(raw::User::id)
            .max()
            .unwrap_or_default()
            .next();
        let mut seen = HashSet::with_capacity(records.len());

        self.users = records
            .into_iter()
            .map(|r| {
                let id = r.id().unwrap_or_else(|| {
                    let id = next;
                    next = next.next();
                    id
                });
                r.normalize(id)
            })
            .filter(|u| {
                let unique = seen.insert(u.id);
                if !unique {
                    log::warn!("duplicate `User(id: {})` dropped", u.id);
                }
                unique
            })
            .collect();
        self.reset_window();
        self.users.len()
    }

    /// Returns the [`User`] with the provided [`user::Id`].
    pub(crate) fn user(&self, id: user::Id) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Returns the [`User`] with the provided [`user::Id`] for modification.
    pub(crate) fn user_mut(&mut self, id: user::Id) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    /// Picks an ID for a created [`User`], preferring the `echoed` one unless
    /// it's absent or taken already.
    pub(crate) fn assign_id(&self, echoed: Option<user::Id>) -> user::Id {
        match echoed {
            Some(id) if self.user(id).is_none() => id,
            Some(id) => {
                let fresh = self.next_id();
                log::warn!("echoed `User(id: {id})` is taken, using `{fresh}`");
                fresh
            }
            None => self.next_id(),
        }
    }

    /// Returns the ID following the greatest one in the collection.
    fn next_id(&self) -> user::Id {
        self.users
            .iter()
            .map(|u| u.id)
            .max()
            .unwrap_or_default()
            .next()
    }

    /// Moves the window back to its initial position.
    pub(crate) fn reset_window(&mut self) {
        let size = self.page_size.get();
        self.window.reset(size);
    }

    /// Emits a new [`Notification`].
    pub(crate) fn notify(&mut self, message: &str, severity: Severity) {
        _ = self.notifications.push(message, severity);
    }

    /// Surfaces the provided [`remote::Error`] in the banner and, if the
    /// `notification` is provided, as an error [`Notification`].
    pub(crate) fn fail(
        &mut self,
        error: &remote::Error,
        notification: Option<&str>,
    ) {
        log::warn!("`{}` failed: {error}", error.operation());
        self.banner = Some(error.to_string());
        if let Some(message) = notification {
            self.notify(message, Severity::Error);
        }
    }

    /// Returns the number of [`User`]s matching the active [`Search`] and
    /// [`Filter`].
    fn total(&self) -> usize {
        self.users
            .iter()
            .filter(|u| list::matches(u, &self.search, &self.filter))
            .count()
    }

    /// Renders the [`View`] out of this [`State`].
    fn view(&self) -> Option<View> {
        if self.loading {
            return None;
        }

        let selected =
            list::select(&self.users, &self.search, &self.filter, self.sort);
        let slice = self.window.slice(&selected, self.page_size.get());
        Some(View {
            rows: slice.items.iter().map(|&u| u.clone()).collect(),
            sort: self.sort,
            window: slice.info,
        })
    }
}
