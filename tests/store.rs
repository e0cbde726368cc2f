#[cfg(test)]
mod tests {
    use avatask::api::{ApiError, AvatarApi};
    use avatask::libs::avatar::{Animation, AvatarState, Mood};
    use avatask::libs::config::ProfileConfig;
    use avatask::libs::identity::IdentityCache;
    use avatask::libs::messages::Message;
    use avatask::libs::store::{Connection, NoticeKind, SessionState, Store, StoreError};
    use avatask::libs::task::{NewTask, Task, TaskCompletion};
    use avatask::libs::user::{NewUser, User};
    use std::collections::{HashMap, HashSet};
    use std::sync::{Mutex, MutexGuard};
    use std::time::{Duration, Instant};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    /// In-memory stand-in for the remote service.
    #[derive(Default)]
    struct Server {
        users: HashMap<String, User>,
        tasks: Vec<Task>,
        next_id: u32,
        failing: HashSet<&'static str>,
        calls: HashMap<&'static str, usize>,
        scripted_completion: Option<TaskCompletion>,
        animation: Animation,
    }

    impl Server {
        fn hit(&mut self, op: &'static str) -> Result<(), ApiError> {
            *self.calls.entry(op).or_default() += 1;
            if self.failing.contains(op) {
                return Err(ApiError::Status {
                    status: 500,
                    detail: format!("{} unavailable", op),
                });
            }
            Ok(())
        }

        fn next_id(&mut self, prefix: &str) -> String {
            self.next_id += 1;
            format!("{}-{:04}", prefix, self.next_id)
        }
    }

    #[derive(Default)]
    struct MockApi {
        server: Mutex<Server>,
    }

    impl MockApi {
        fn server(&self) -> MutexGuard<'_, Server> {
            self.server.lock().unwrap()
        }

        fn fail(&self, op: &'static str) {
            self.server().failing.insert(op);
        }

        fn recover(&self, op: &'static str) {
            self.server().failing.remove(op);
        }

        fn calls(&self, op: &'static str) -> usize {
            self.server().calls.get(op).copied().unwrap_or(0)
        }

        fn seed_user(&self, id: &str, xp: u32, level: u32) {
            let user = User {
                id: id.to_string(),
                name: "Seeded".to_string(),
                email: "seeded@example.com".to_string(),
                xp,
                level,
                avatar_mood: Mood::Neutral,
            };
            self.server().users.insert(id.to_string(), user);
        }
    }

    impl AvatarApi for MockApi {
        async fn health(&self) -> Result<String, ApiError> {
            self.server().hit("health")?;
            Ok("Avatar Productivity API is running!".to_string())
        }

        async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
            let mut server = self.server();
            server.hit("create_user")?;
            let id = server.next_id("user");
            let created = User {
                id: id.clone(),
                name: user.name.clone(),
                email: user.email.clone(),
                xp: 0,
                level: 1,
                avatar_mood: Mood::Neutral,
            };
            server.users.insert(id, created.clone());
            Ok(created)
        }

        async fn get_user(&self, user_id: &str) -> Result<User, ApiError> {
            let mut server = self.server();
            server.hit("get_user")?;
            server.users.get(user_id).cloned().ok_or(ApiError::Status {
                status: 404,
                detail: "User not found".to_string(),
            })
        }

        async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>, ApiError> {
            let mut server = self.server();
            server.hit("list_tasks")?;
            Ok(server.tasks.iter().filter(|task| task.user_id == user_id).cloned().collect())
        }

        async fn avatar_state(&self, user_id: &str) -> Result<AvatarState, ApiError> {
            let mut server = self.server();
            server.hit("avatar_state")?;
            let user = server.users.get(user_id).cloned().ok_or(ApiError::Status {
                status: 404,
                detail: "User not found".to_string(),
            })?;
            Ok(AvatarState {
                message: Some(format!("Hey {}!", user.name)),
                animation: server.animation,
                mood: Some(user.avatar_mood),
                xp: Some(user.xp),
                level: Some(user.level),
            })
        }

        async fn create_task(&self, user_id: &str, task: &NewTask) -> Result<(), ApiError> {
            let mut server = self.server();
            server.hit("create_task")?;
            let id = server.next_id("task");
            server.tasks.push(Task {
                id,
                user_id: user_id.to_string(),
                title: task.title.clone(),
                description: task.description.clone(),
                xp_reward: task.xp_reward,
                completed: false,
                created_at: None,
                completed_at: None,
            });
            Ok(())
        }

        async fn complete_task(&self, task_id: &str) -> Result<TaskCompletion, ApiError> {
            let mut server = self.server();
            server.hit("complete_task")?;
            let position = server.tasks.iter().position(|task| task.id == task_id).ok_or(ApiError::Status {
                status: 404,
                detail: "Task not found".to_string(),
            })?;
            server.tasks[position].completed = true;
            let task = server.tasks[position].clone();

            if let Some(completion) = server.scripted_completion.take() {
                return Ok(completion);
            }

            let user = server.users.get_mut(&task.user_id).unwrap();
            let new_xp = user.xp + task.xp_reward as u32;
            let new_level = new_xp / 100 + 1;
            let level_up = new_level > user.level;
            let mood = if level_up { Mood::Excited } else { Mood::Happy };
            user.xp = new_xp;
            user.level = new_level;
            user.avatar_mood = mood.clone();
            server.animation = if level_up { Animation::Celebrate } else { Animation::HappyBounce };

            Ok(TaskCompletion {
                new_xp,
                new_level,
                avatar_mood: mood,
                xp_gained: task.xp_reward,
                level_up,
                message: Some("Task completed successfully!".to_string()),
                ai_message: None,
            })
        }

        async fn delete_task(&self, task_id: &str) -> Result<(), ApiError> {
            let mut server = self.server();
            server.hit("delete_task")?;
            let before = server.tasks.len();
            server.tasks.retain(|task| task.id != task_id);
            if server.tasks.len() == before {
                return Err(ApiError::Status {
                    status: 404,
                    detail: "Task not found".to_string(),
                });
            }
            Ok(())
        }
    }

    struct StoreTestContext {
        temp_dir: TempDir,
    }

    impl AsyncTestContext for StoreTestContext {
        async fn setup() -> Self {
            StoreTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    impl StoreTestContext {
        fn identity(&self) -> IdentityCache {
            IdentityCache::at(&self.temp_dir.path().join("user_id"))
        }

        fn store(&self, api: MockApi) -> Store<MockApi> {
            Store::new(api, self.identity(), ProfileConfig::default())
        }

        async fn connected(&self, xp: u32, level: u32) -> Store<MockApi> {
            let api = MockApi::default();
            api.seed_user("user-seeded", xp, level);
            self.identity().store("user-seeded").unwrap();
            let mut store = self.store(api);
            store.connect().await.unwrap();
            store
        }
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_connect_creates_and_caches_user(ctx: &mut StoreTestContext) {
        let mut store = ctx.store(MockApi::default());
        assert_eq!(store.state(), SessionState::Uninitialized);

        let connection = store.connect().await.unwrap();

        assert_eq!(connection, Connection::Created);
        assert_eq!(store.state(), SessionState::Ready);
        let user = store.user().unwrap();
        assert_eq!(user.name, ProfileConfig::default().name);
        assert_eq!(ctx.identity().load().unwrap(), Some(user.id.clone()));
        assert_eq!(store.api().calls("list_tasks"), 1);
        assert_eq!(store.api().calls("avatar_state"), 1);
        assert!(store.avatar().is_some());
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_connect_restores_cached_user(ctx: &mut StoreTestContext) {
        let api = MockApi::default();
        api.seed_user("user-cached", 40, 1);
        ctx.identity().store("user-cached").unwrap();
        let mut store = ctx.store(api);

        let connection = store.connect().await.unwrap();

        assert_eq!(connection, Connection::Restored);
        assert_eq!(store.user().unwrap().id, "user-cached");
        assert_eq!(store.api().calls("create_user"), 0);
        assert_eq!(store.api().calls("get_user"), 1);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_connection_failure_is_terminal(ctx: &mut StoreTestContext) {
        let api = MockApi::default();
        api.fail("create_user");
        let mut store = ctx.store(api);

        let result = store.connect().await;
        assert!(matches!(result, Err(StoreError::Connection(_))));
        assert_eq!(store.state(), SessionState::Failed);
        assert_eq!(ctx.identity().load().unwrap(), None);

        // Recovering the server does not revive the session
        store.api().recover("create_user");
        assert!(matches!(store.connect().await, Err(StoreError::Failed)));
        let created = store.create_task(NewTask::new("Anything", None, 10)).await;
        assert!(matches!(created, Err(StoreError::Failed)));
        assert_eq!(store.api().calls("create_task"), 0);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_unknown_cached_user_fails_connection(ctx: &mut StoreTestContext) {
        ctx.identity().store("user-gone").unwrap();
        let mut store = ctx.store(MockApi::default());

        match store.connect().await {
            Err(StoreError::Connection(e)) => assert!(e.is_not_found()),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        assert_eq!(store.state(), SessionState::Failed);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_mutation_before_connect_is_rejected(ctx: &mut StoreTestContext) {
        let mut store = ctx.store(MockApi::default());

        assert!(matches!(store.delete_task("task-0001").await, Err(StoreError::NotReady)));
        assert!(matches!(store.complete_task("task-0001").await, Err(StoreError::NotReady)));
        assert_eq!(store.api().calls("delete_task"), 0);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_create_task_refetches_list(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(0, 1).await;
        let list_calls = store.api().calls("list_tasks");

        let created = store.create_task(NewTask::new("Write tests", Some("store"), 25)).await.unwrap();

        assert!(created);
        assert_eq!(store.api().calls("list_tasks"), list_calls + 1);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "Write tests");
        assert_eq!(store.tasks()[0].xp_reward, 25);
        let notice = store.notice(Instant::now()).unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_level_up_scenario(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(95, 1).await;
        store.create_task(NewTask::new("Finish chapter", None, 10)).await.unwrap();
        let task_id = store.tasks()[0].id.clone();

        let completion = store.complete_task(&task_id).await.unwrap().unwrap();

        assert_eq!(completion.new_xp, 105);
        assert_eq!(completion.new_level, 2);
        assert!(completion.level_up);

        let user = store.user().unwrap();
        assert_eq!(user.xp, 105);
        assert_eq!(user.level, 2);
        assert_eq!(user.avatar_mood, Mood::Excited);

        let progress = store.progress().unwrap();
        assert_eq!(progress.current, 5);
        assert_eq!(progress.per_level, 100);
        assert_eq!(Message::LevelLabel(progress.level).to_string(), "Level 2");

        let notice = store.notice(Instant::now()).unwrap();
        assert!(notice.text.contains("+10 XP"));
        assert!(notice.text.contains(&Message::LevelUp(2).to_string()));

        let scene = store.scene(0.0, false).unwrap();
        assert_eq!(scene.level_label, "Level 2");
        assert_eq!(scene.animation, Animation::Celebrate);
        assert!(store.tasks()[0].completed);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_completion_trusts_server_values(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(10, 1).await;
        store.create_task(NewTask::new("Odd rules", None, 10)).await.unwrap();
        let task_id = store.tasks()[0].id.clone();
        store.api().server().scripted_completion = Some(TaskCompletion {
            new_xp: 480,
            new_level: 7,
            avatar_mood: Mood::Tired,
            xp_gained: 10,
            level_up: false,
            message: None,
            ai_message: None,
        });

        store.complete_task(&task_id).await.unwrap();

        let user = store.user().unwrap();
        assert_eq!(user.xp, 480);
        assert_eq!(user.level, 7);
        assert_eq!(user.avatar_mood, Mood::Tired);
        let notice = store.notice(Instant::now()).unwrap();
        assert!(!notice.text.contains("Level up"));
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_failed_completion_keeps_user(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(50, 1).await;
        store.create_task(NewTask::new("Flaky", None, 30)).await.unwrap();
        let task_id = store.tasks()[0].id.clone();
        store.api().fail("complete_task");

        let completion = store.complete_task(&task_id).await.unwrap();

        assert!(completion.is_none());
        assert_eq!(store.user().unwrap().xp, 50);
        assert!(!store.tasks()[0].completed);
        let notice = store.notice(Instant::now()).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_delete_removes_open_and_completed_tasks(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(0, 1).await;
        store.create_task(NewTask::new("Open", None, 10)).await.unwrap();
        store.create_task(NewTask::new("Done", None, 10)).await.unwrap();
        let done_id = store.tasks().iter().find(|task| task.title == "Done").unwrap().id.clone();
        store.complete_task(&done_id).await.unwrap();

        assert!(store.delete_task(&done_id).await.unwrap());
        assert!(store.tasks().iter().all(|task| task.id != done_id));

        let open_id = store.tasks()[0].id.clone();
        assert!(store.delete_task(&open_id).await.unwrap());
        assert!(store.tasks().is_empty());
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_failed_create_leaves_state_and_expires(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(0, 1).await;
        store.create_task(NewTask::new("Kept", None, 10)).await.unwrap();
        store.api().fail("create_task");
        let list_calls = store.api().calls("list_tasks");

        let created = store.create_task(NewTask::new("Lost", None, 10)).await.unwrap();

        assert!(!created);
        // The list is re-fetched even after a failure
        assert_eq!(store.api().calls("list_tasks"), list_calls + 1);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "Kept");

        let now = Instant::now();
        let notice = store.notice(now).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.text.contains(&Message::TaskCreateFailed.to_string()));
        assert!(store.notice(now + Duration::from_secs(4)).is_none());
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_refresh_failure_keeps_last_list(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(0, 1).await;
        store.create_task(NewTask::new("Survivor", None, 10)).await.unwrap();
        store.api().fail("list_tasks");

        store.refresh_all().await;

        assert_eq!(store.tasks().len(), 1);
        let notice = store.notice(Instant::now()).unwrap();
        assert!(notice.text.contains(&Message::TasksRefreshFailed.to_string()));
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_stale_task_list_is_discarded(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(0, 1).await;
        store.create_task(NewTask::new("Fresh", None, 10)).await.unwrap();
        let fresh = store.tasks().to_vec();

        let older = store.issue_tasks_ticket();
        let newer = store.issue_tasks_ticket();
        store.apply_tasks(newer, Ok(fresh.clone()));
        store.apply_tasks(older, Ok(Vec::new()));

        assert_eq!(store.tasks(), fresh.as_slice());
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_level_up_notice_survives_failed_refetch(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(95, 1).await;
        store.create_task(NewTask::new("Last push", None, 10)).await.unwrap();
        let task_id = store.tasks()[0].id.clone();
        store.api().fail("avatar_state");

        let completion = store.complete_task(&task_id).await.unwrap().unwrap();

        assert!(completion.level_up);
        assert_eq!(store.user().unwrap().level, 2);
        let notice = store.notice(Instant::now()).unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(notice.text.contains(&Message::LevelUp(2).to_string()));
        // The task list half of the re-fetch still landed
        assert!(store.tasks()[0].completed);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_mutation_notices_survive_failed_list_refetch(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(0, 1).await;
        store.create_task(NewTask::new("Keep me", None, 10)).await.unwrap();
        store.api().fail("list_tasks");

        assert!(store.create_task(NewTask::new("Hidden", None, 10)).await.unwrap());
        let notice = store.notice(Instant::now()).unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(notice.text.contains(&Message::TaskCreated.to_string()));

        let task_id = store.tasks()[0].id.clone();
        assert!(store.delete_task(&task_id).await.unwrap());
        let notice = store.notice(Instant::now()).unwrap();
        assert!(notice.text.contains(&Message::TaskDeleted.to_string()));

        // A plain refresh still reports its own failure
        store.refresh_tasks().await;
        let notice = store.notice(Instant::now()).unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_reconnect_reports_original_connection(ctx: &mut StoreTestContext) {
        let mut store = ctx.store(MockApi::default());
        assert_eq!(store.connect().await.unwrap(), Connection::Created);

        assert_eq!(store.connect().await.unwrap(), Connection::Created);
        assert_eq!(store.api().calls("create_user"), 1);
        assert_eq!(store.api().calls("get_user"), 0);
        assert_eq!(store.api().calls("list_tasks"), 1);
    }

    #[test_context(StoreTestContext)]
    #[tokio::test]
    async fn test_find_task_by_prefix(ctx: &mut StoreTestContext) {
        let mut store = ctx.connected(0, 1).await;
        store.create_task(NewTask::new("First", None, 10)).await.unwrap();
        store.create_task(NewTask::new("Second", None, 10)).await.unwrap();
        let first_id = store.tasks()[0].id.clone();

        assert_eq!(store.find_task(&first_id).unwrap().title, "First");
        // Both ids start with "task-", so the prefix is ambiguous
        assert!(store.find_task("task-").is_none());
        assert!(store.find_task("").is_none());
        assert!(store.find_task("missing").is_none());
    }
}
