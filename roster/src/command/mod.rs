//! [`Command`] definitions.

pub mod create_user;
pub mod delete_user;
pub mod load_users;
pub mod update_user;

/// [`Command`] of the [`Controller`] awaiting its [`Remote`] record service.
///
/// [`Controller`]: crate::Controller
/// [`Remote`]: crate::infra::Remote
pub use common::Handler as Command;

pub use self::{
    create_user::CreateUser, delete_user::DeleteUser, load_users::LoadUsers,
    update_user::UpdateUser,
};

/// Message of the [`Notification`] emitted on a failed creation or update.
///
/// [`Notification`]: crate::notification::Notification
const SAVE_FAILED: &str = "Failed to save user";

#[cfg(test)]
mod spec {
    use std::cell::{Cell, RefCell};

    use common::{
        operations::{By, Delete, Insert, Select, Update},
        pagination::{GrowthInfo, Info, Mode, PageInfo},
    };
    use tokio::task;
    use tracerr::Traced;

    use crate::{
        domain::user,
        form::{Draft, Form},
        infra::remote::{self, raw, Operation, Remote},
        notification::Severity,
        Config, Controller,
    };

    use super::{Command as _, CreateUser, DeleteUser, LoadUsers, UpdateUser};

    /// [`Remote`] responding with prepared records and failing on demand.
    #[derive(Debug, Default)]
    struct Scripted {
        /// Records to respond to listing with.
        records: Vec<raw::User>,

        /// ID to echo on creation.
        echoed_id: Option<u64>,

        /// [`Operation`]s to fail.
        failing: RefCell<Vec<Operation>>,

        /// Number of times to yield before the next response.
        yields: Cell<usize>,
    }

    impl Scripted {
        fn with_users(count: u64) -> Self {
            Self {
                records: (1..=count)
                    .map(|id| raw::User {
                        id: Some(id),
                        name: Some(format!("First{id} Last{id}")),
                        email: Some(format!("user{id}@example.com")),
                        company: None,
                    })
                    .collect(),
                echoed_id: Some(count + 1),
                ..Self::default()
            }
        }

        fn fail(&self, op: Operation) {
            self.failing.borrow_mut().push(op);
        }

        async fn respond(
            &self,
            op: Operation,
        ) -> Result<(), Traced<remote::Error>> {
            for _ in 0..self.yields.take() {
                task::yield_now().await;
            }
            if self.failing.borrow().contains(&op) {
                return Err(tracerr::new!(remote::Error::Rejected(op)));
            }
            Ok(())
        }
    }

    impl Remote<Select<By<Vec<raw::User>, ()>>> for Scripted {
        type Ok = Vec<raw::User>;
        type Err = Traced<remote::Error>;

        async fn execute(
            &self,
            _: Select<By<Vec<raw::User>, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            self.respond(Operation::List).await?;
            Ok(self.records.clone())
        }
    }

    impl Remote<Insert<raw::Payload>> for Scripted {
        type Ok = raw::User;
        type Err = Traced<remote::Error>;

        async fn execute(
            &self,
            Insert(payload): Insert<raw::Payload>,
        ) -> Result<Self::Ok, Self::Err> {
            self.respond(Operation::Create).await?;
            Ok(raw::User {
                id: self.echoed_id,
                name: Some(payload.name),
                email: Some(payload.email),
                company: Some(payload.company),
            })
        }
    }

    impl Remote<Update<(user::Id, raw::Payload)>> for Scripted {
        type Ok = raw::User;
        type Err = Traced<remote::Error>;

        async fn execute(
            &self,
            Update((id, payload)): Update<(user::Id, raw::Payload)>,
        ) -> Result<Self::Ok, Self::Err> {
            self.respond(Operation::Update).await?;
            assert_eq!(payload.id, Some(id.into()));
            Ok(raw::User {
                id: Some(id.into()),
                name: Some(payload.name),
                ..raw::User::default()
            })
        }
    }

    impl Remote<Delete<user::Id>> for Scripted {
        type Ok = ();
        type Err = Traced<remote::Error>;

        async fn execute(
            &self,
            _: Delete<user::Id>,
        ) -> Result<Self::Ok, Self::Err> {
            self.respond(Operation::Delete).await
        }
    }

    async fn loaded(remote: Scripted) -> Controller<Scripted> {
        let controller = Controller::new(Config::default(), remote);
        _ = controller.execute(LoadUsers).await.unwrap();
        controller
    }

    fn ann() -> user::Fields {
        Draft {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            email: "a@b.com".into(),
            department: "Eng".into(),
        }
        .validate()
        .unwrap()
    }

    fn page(controller: &Controller<Scripted>) -> usize {
        match controller.view().unwrap().window {
            Info::Paged(PageInfo { page, .. }) => page,
            Info::Growing(_) => panic!("expected paged window"),
        }
    }

    #[tokio::test]
    async fn loads_users() {
        let controller =
            Controller::new(Config::default(), Scripted::with_users(12));
        assert_eq!(controller.execute(LoadUsers).await.unwrap(), Some(12));

        assert!(!controller.is_loading());
        assert_eq!(controller.banner(), None);
        assert_eq!(controller.users().len(), 12);
        assert_eq!(controller.view().unwrap().rows.len(), 10);
        assert_eq!(controller.users()[0].department.as_ref(), "General");
    }

    #[tokio::test]
    async fn surfaces_load_failure() {
        let remote = Scripted::with_users(5);
        remote.fail(Operation::List);
        let controller = Controller::new(Config::default(), remote);

        assert!(controller.execute(LoadUsers).await.is_err());
        assert!(!controller.is_loading());
        assert!(controller.users().is_empty());
        assert_eq!(
            controller.banner().as_deref(),
            Some("Failed to fetch users"),
        );
        assert!(controller.notifications().is_empty());
    }

    #[tokio::test]
    async fn discards_superseded_load() {
        let remote = Scripted::with_users(3);
        remote.yields.set(3);
        let controller = Controller::new(Config::default(), remote);

        let (first, second) = tokio::join!(
            controller.execute(LoadUsers),
            controller.execute(LoadUsers),
        );
        assert_eq!(first.unwrap(), None);
        assert_eq!(second.unwrap(), Some(3));
        assert!(!controller.is_loading());
        assert_eq!(controller.users().len(), 3);
    }

    #[tokio::test]
    async fn discards_load_after_teardown() {
        let remote = Scripted::with_users(3);
        remote.yields.set(2);
        let controller = Controller::new(Config::default(), remote);

        let (result, ()) = tokio::join!(controller.execute(LoadUsers), async {
            task::yield_now().await;
            controller.teardown();
        });
        assert_eq!(result.unwrap(), None);
        assert!(controller.users().is_empty());
    }

    #[tokio::test]
    async fn creates_user() {
        let controller = loaded(Scripted::with_users(23)).await;
        assert!(controller.set_page(3));
        _ = controller.open_create();

        let created = controller
            .execute(CreateUser { fields: ann() })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(created.id, user::Id::from(24));
        let users = controller.users();
        assert_eq!(users.len(), 24);
        assert_eq!(users[0], created);
        assert_eq!(users[0].first_name.as_ref(), "Ann");
        assert_eq!(users[0].last_name.as_ref(), "Lee");
        assert_eq!(users[0].email.as_ref(), "a@b.com");
        assert_eq!(users[0].department.as_ref(), "Eng");
        assert_eq!(page(&controller), 1);
        assert_eq!(controller.form(), Form::Closed);
        assert!(!controller.is_submitting());

        let notification = controller.notifications().pop().unwrap();
        assert_eq!(notification.severity, Severity::Success);
        assert_eq!(notification.message, "User created");
    }

    #[tokio::test]
    async fn assigns_fresh_id_when_echoed_one_is_taken() {
        let remote = Scripted {
            echoed_id: Some(2),
            ..Scripted::with_users(5)
        };
        let controller = loaded(remote).await;

        let created = controller
            .execute(CreateUser { fields: ann() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, user::Id::from(6));

        let created = controller
            .execute(CreateUser { fields: ann() })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.id, user::Id::from(7));
    }

    #[tokio::test]
    async fn keeps_form_open_on_failed_creation() {
        let controller = loaded(Scripted::with_users(3)).await;
        controller.remote().fail(Operation::Create);
        _ = controller.open_create();

        let created = controller.execute(CreateUser { fields: ann() }).await;
        assert!(created.is_err());

        assert_eq!(controller.users().len(), 3);
        assert_eq!(controller.form(), Form::Create);
        assert!(!controller.is_submitting());
        assert_eq!(
            controller.banner().as_deref(),
            Some("Failed to create user"),
        );
        let notification = controller.notifications().pop().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Failed to save user");
    }

    #[tokio::test]
    async fn refuses_concurrent_submits() {
        let controller = loaded(Scripted::with_users(3)).await;
        controller.remote().yields.set(2);

        let (first, second) = tokio::join!(
            controller.execute(CreateUser { fields: ann() }),
            controller.execute(CreateUser { fields: ann() }),
        );
        assert!(first.unwrap().is_some());
        assert!(matches!(
            second.unwrap_err().as_ref(),
            super::create_user::ExecutionError::Busy,
        ));
        assert_eq!(controller.users().len(), 4);
    }

    #[tokio::test]
    async fn updates_user_in_place() {
        let controller = loaded(Scripted::with_users(3)).await;
        let id = user::Id::from(2);
        _ = controller.open_edit(id);

        let updated = controller
            .execute(UpdateUser { id, fields: ann() })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, id);
        let users = controller.users();
        assert_eq!(users[1], updated);
        assert_eq!(users[1].first_name.as_ref(), "Ann");
        assert_eq!(controller.form(), Form::Closed);
        assert_eq!(
            controller.notifications().pop().unwrap().message,
            "User updated",
        );
    }

    #[tokio::test]
    async fn keeps_form_open_on_failed_update() {
        let controller = loaded(Scripted::with_users(3)).await;
        controller.remote().fail(Operation::Update);
        let id = user::Id::from(2);
        _ = controller.open_edit(id);

        let updated =
            controller.execute(UpdateUser { id, fields: ann() }).await;
        assert!(updated.is_err());

        assert_eq!(controller.users()[1].first_name.as_ref(), "First2");
        assert_eq!(controller.form(), Form::Edit(id));
        assert_eq!(
            controller.banner().as_deref(),
            Some("Failed to update user"),
        );
    }

    #[tokio::test]
    async fn refuses_to_update_unknown_user() {
        let controller = loaded(Scripted::with_users(3)).await;

        let err = controller
            .execute(UpdateUser {
                id: user::Id::from(9),
                fields: ann(),
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_ref(),
            super::update_user::ExecutionError::UserNotExists(_),
        ));
        assert!(controller.banner().is_some());
    }

    #[tokio::test]
    async fn deletes_confirmed_user() {
        let controller = loaded(Scripted::with_users(3)).await;
        let id = user::Id::from(2);

        assert!(controller.execute(DeleteUser { id }).await.is_err());
        assert_eq!(controller.users().len(), 3);

        _ = controller.request_delete(id);
        assert!(controller.execute(DeleteUser { id }).await.unwrap());

        assert_eq!(
            controller
                .users()
                .iter()
                .map(|u| u64::from(u.id))
                .collect::<Vec<_>>(),
            [1, 3],
        );
        let notification = controller.notifications().pop().unwrap();
        assert_eq!(notification.severity, Severity::Success);
        assert_eq!(notification.message, "User deleted");
    }

    #[tokio::test]
    async fn does_not_restore_user_on_failed_deletion() {
        let controller = loaded(Scripted::with_users(3)).await;
        controller.remote().fail(Operation::Delete);
        let id = user::Id::from(2);

        _ = controller.request_delete(id);
        assert!(controller.execute(DeleteUser { id }).await.is_err());

        assert!(controller.view().unwrap().rows.iter().all(|u| u.id != id));
        assert_eq!(controller.users().len(), 2);
        assert_eq!(
            controller.banner().as_deref(),
            Some("Failed to delete user"),
        );
        let notification = controller.notifications().pop().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert_eq!(notification.message, "Failed to delete user");
    }

    #[tokio::test]
    async fn shrinks_grown_window_on_creation() {
        let controller = loaded(Scripted::with_users(25)).await;
        assert!(controller.set_mode(Mode::Growing));
        assert!(controller.advance());

        _ = controller
            .execute(CreateUser { fields: ann() })
            .await
            .unwrap()
            .unwrap();

        let view = controller.view().unwrap();
        assert_eq!(
            view.window,
            Info::Growing(GrowthInfo {
                shown: 10,
                total: 26,
            }),
        );
        assert_eq!(view.rows[0].first_name.as_ref(), "Ann");
    }

    #[tokio::test]
    async fn discards_creation_after_teardown() {
        let controller = loaded(Scripted::with_users(3)).await;
        controller.remote().yields.set(2);
        _ = controller.open_create();

        let (result, ()) = tokio::join!(
            controller.execute(CreateUser { fields: ann() }),
            async {
                task::yield_now().await;
                controller.teardown();
            },
        );

        assert_eq!(result.unwrap(), None);
        assert_eq!(controller.users().len(), 3);
        assert_eq!(controller.form(), Form::Create);
        assert!(!controller.is_submitting());
        assert!(controller.notifications().is_empty());
    }

    #[tokio::test]
    async fn discards_update_after_teardown() {
        let controller = loaded(Scripted::with_users(3)).await;
        controller.remote().yields.set(2);
        let id = user::Id::from(2);
        _ = controller.open_edit(id);

        let (result, ()) = tokio::join!(
            controller.execute(UpdateUser { id, fields: ann() }),
            async {
                task::yield_now().await;
                controller.teardown();
            },
        );

        assert_eq!(result.unwrap(), None);
        assert_eq!(controller.users()[1].first_name.as_ref(), "First2");
        assert_eq!(controller.form(), Form::Edit(id));
        assert!(controller.notifications().is_empty());
    }

    #[tokio::test]
    async fn discards_deletion_after_teardown() {
        let controller = loaded(Scripted::with_users(3)).await;
        controller.remote().yields.set(2);
        controller.remote().fail(Operation::Delete);
        let id = user::Id::from(2);
        _ = controller.request_delete(id);

        let (result, ()) =
            tokio::join!(controller.execute(DeleteUser { id }), async {
                task::yield_now().await;
                controller.teardown();
            });

        assert!(!result.unwrap());
        assert_eq!(controller.users().len(), 2);
        assert_eq!(controller.banner(), None);
        assert!(controller.notifications().is_empty());
    }

    #[tokio::test]
    async fn notifies_update_of_user_deleted_meanwhile() {
        let controller = loaded(Scripted::with_users(3)).await;
        controller.remote().yields.set(2);
        let id = user::Id::from(2);
        _ = controller.open_edit(id);

        let (result, ()) = tokio::join!(
            controller.execute(UpdateUser { id, fields: ann() }),
            async {
                task::yield_now().await;
                controller.state().users.retain(|u| u.id != id);
            },
        );

        assert_eq!(result.unwrap(), None);
        assert_eq!(controller.users().len(), 2);
        assert_eq!(controller.form(), Form::Closed);
        let notification = controller.notifications().pop().unwrap();
        assert_eq!(notification.severity, Severity::Success);
        assert_eq!(notification.message, "User updated");
    }
}
