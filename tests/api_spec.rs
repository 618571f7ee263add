use speculate2::speculate;

speculate! {
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::{TestResponse, TestServer};
    use quest_core::Database;
    use quest_dashboard::api::{create_router, AppState};
    use quest_dashboard::config::{AdminCredentials, Config};
    use serde_json::{json, Value};

    fn setup_server() -> TestServer {
        let db = Database::open_memory().expect("Failed to create test database");
        db.migrate().expect("Failed to migrate test database");

        let mut config = Config::development();
        config.admin = Some(AdminCredentials {
            username: "root".to_string(),
            password: "hunter2-admin".to_string(),
        });

        TestServer::new(create_router(AppState::new(db, config)))
            .expect("Failed to start test server")
    }

    /// The `name=value` pair of the response's session cookie.
    fn session_cookie(response: &TestResponse) -> HeaderValue {
        let set_cookie = response.header(header::SET_COOKIE);
        let pair = set_cookie
            .to_str()
            .expect("Set-Cookie is not ASCII")
            .split(';')
            .next()
            .expect("Empty Set-Cookie")
            .to_string();
        HeaderValue::from_str(&pair).expect("Invalid cookie pair")
    }

    async fn signup(server: &TestServer, name: &str) -> HeaderValue {
        let response = server
            .post("/api/auth/signup")
            .json(&json!({
                "email": format!("{name}@example.com"),
                "username": name,
                "password": "correct horse",
            }))
            .await;
        response.assert_status_ok();
        session_cookie(&response)
    }

    async fn create_task(server: &TestServer, cookie: &HeaderValue, minutes: f64) -> Value {
        let response = server
            .post("/api/tasks")
            .add_header(header::COOKIE, cookie.clone())
            .json(&json!({ "title": "Write report", "difficulty": 2, "estimated_minutes": minutes }))
            .await;
        response.assert_status_ok();
        response.json::<Value>()["task"].clone()
    }

    describe "public endpoints" {
        it "answers health checks" {
            tokio_test::block_on(async {
                let server = setup_server();
                let body = server.get("/api/health").await.json::<Value>();
                assert_eq!(body, json!({ "status": "ok" }));
            });
        }

        it "reports a 95% success rate before any task exists" {
            tokio_test::block_on(async {
                let server = setup_server();
                let body = server.get("/api/public/stats").await.json::<Value>();
                assert_eq!(body["total_users"], 0);
                assert_eq!(body["completed_tasks"], 0);
                assert_eq!(body["success_rate"], 95);
            });
        }

        it "returns a JSON 404 for unknown routes" {
            tokio_test::block_on(async {
                let server = setup_server();
                let response = server.get("/api/nowhere").await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["error"], "Route not found");
            });
        }
    }

    describe "user sessions" {
        it "signs up, sets the session cookie and hides the password hash" {
            tokio_test::block_on(async {
                let server = setup_server();
                let response = server
                    .post("/api/auth/signup")
                    .json(&json!({ "email": "Ada@Example.com", "username": "ada", "password": "pw" }))
                    .await;
                response.assert_status_ok();

                let set_cookie = response.header(header::SET_COOKIE);
                let set_cookie = set_cookie.to_str().unwrap();
                assert!(set_cookie.starts_with("qd4_token="));
                assert!(set_cookie.contains("HttpOnly"));
                assert!(set_cookie.contains("Max-Age=2592000"));

                let body = response.json::<Value>();
                assert_eq!(body["success"], true);
                assert_eq!(body["user"]["email"], "ada@example.com");
                assert_eq!(body["user"]["level"], 1);
                assert!(body["user"].get("password_hash").is_none());
            });
        }

        it "rejects missing fields and duplicate emails" {
            tokio_test::block_on(async {
                let server = setup_server();
                server
                    .post("/api/auth/signup")
                    .json(&json!({ "email": "ada@example.com" }))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);

                signup(&server, "ada").await;
                let duplicate = server
                    .post("/api/auth/signup")
                    .json(&json!({ "email": "ADA@example.com", "username": "other", "password": "pw" }))
                    .await;
                duplicate.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(duplicate.json::<Value>()["error"], "Email already registered");
            });
        }

        it "rejects an empty password" {
            tokio_test::block_on(async {
                let server = setup_server();
                let response = server
                    .post("/api/auth/signup")
                    .json(&json!({ "email": "ada@example.com", "username": "ada", "password": "" }))
                    .await;
                response.assert_status(StatusCode::BAD_REQUEST);
                assert_eq!(response.json::<Value>()["error"], "Password must not be empty");
            });
        }

        it "logs in with the right password only" {
            tokio_test::block_on(async {
                let server = setup_server();
                signup(&server, "ada").await;

                let wrong = server
                    .post("/api/auth/login")
                    .json(&json!({ "email": "ada@example.com", "password": "nope" }))
                    .await;
                wrong.assert_status(StatusCode::UNAUTHORIZED);
                assert_eq!(wrong.json::<Value>()["error"], "Invalid credentials");

                server
                    .post("/api/auth/login")
                    .json(&json!({ "email": "nobody@example.com", "password": "nope" }))
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);

                let ok = server
                    .post("/api/auth/login")
                    .json(&json!({ "email": "ada@example.com", "password": "correct horse" }))
                    .await;
                ok.assert_status_ok();
                let cookie = session_cookie(&ok);

                let me = server
                    .get("/api/auth/me")
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(me["user"]["username"], "ada");
            });
        }

        it "answers /me with null instead of 401 without a session" {
            tokio_test::block_on(async {
                let server = setup_server();
                let response = server.get("/api/auth/me").await;
                response.assert_status_ok();
                assert_eq!(response.json::<Value>(), json!({ "user": null }));

                let garbage = server
                    .get("/api/auth/me")
                    .add_header(header::COOKIE, HeaderValue::from_static("qd4_token=garbage"))
                    .await;
                assert_eq!(garbage.json::<Value>(), json!({ "user": null }));
            });
        }

        it "clears the cookie on logout" {
            tokio_test::block_on(async {
                let server = setup_server();
                let response = server.post("/api/auth/logout").await;
                response.assert_status_ok();
                let set_cookie = response.header(header::SET_COOKIE);
                assert!(set_cookie.to_str().unwrap().contains("Max-Age=0"));
            });
        }
    }

    describe "tasks" {
        it "requires a session" {
            tokio_test::block_on(async {
                let server = setup_server();
                let response = server.get("/api/tasks").await;
                response.assert_status(StatusCode::UNAUTHORIZED);
                assert_eq!(response.json::<Value>()["error"], "Unauthorized");

                server
                    .patch(&format!("/api/tasks/{}/complete", uuid::Uuid::new_v4()))
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);
            });
        }

        it "prices a task when it is created" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;

                let task = create_task(&server, &cookie, 30.0).await;
                assert_eq!(task["xp_reward"], 100);
                assert_eq!(task["skill_tree"], "Mind");
                assert_eq!(task["completed"], false);

                let listed = server
                    .get("/api/tasks")
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(listed["tasks"].as_array().unwrap().len(), 1);
            });
        }

        it "rejects negative effort" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;
                server
                    .post("/api/tasks")
                    .add_header(header::COOKIE, cookie)
                    .json(&json!({ "title": "Time travel", "estimated_minutes": -5 }))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            });
        }

        it "rejects rewards too large to store" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;
                server
                    .post("/api/tasks")
                    .add_header(header::COOKIE, cookie)
                    .json(&json!({ "title": "Boil the ocean", "estimated_minutes": 1e300 }))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            });
        }

        it "grants XP once and reports the current level on repeats" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;
                let task = create_task(&server, &cookie, 30.0).await;
                let path = format!("/api/tasks/{}/complete", task["id"].as_str().unwrap());

                let first = server
                    .patch(&path)
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                assert_eq!(first["success"], true);
                assert_eq!(first["xp_gained"], 100);
                assert_eq!(first["level_up"], true);
                assert_eq!(first["new_level"], 2);

                let second = server
                    .patch(&path)
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                assert_eq!(second["xp_gained"], 0);
                assert_eq!(second["level_up"], false);
                assert_eq!(second["new_level"], 2);

                let me = server
                    .get("/api/auth/me")
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(me["user"]["total_xp"], 100);
            });
        }

        it "hides other users' tasks behind a 404" {
            tokio_test::block_on(async {
                let server = setup_server();
                let owner = signup(&server, "ada").await;
                let intruder = signup(&server, "eve").await;
                let task = create_task(&server, &owner, 10.0).await;
                let id = task["id"].as_str().unwrap();

                let response = server
                    .patch(&format!("/api/tasks/{id}/complete"))
                    .add_header(header::COOKIE, intruder.clone())
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["error"], "Task not found");

                server
                    .delete(&format!("/api/tasks/{id}"))
                    .add_header(header::COOKIE, intruder)
                    .await
                    .assert_status(StatusCode::NOT_FOUND);

                server
                    .patch("/api/tasks/not-a-uuid/complete")
                    .add_header(header::COOKIE, owner.clone())
                    .await
                    .assert_status(StatusCode::NOT_FOUND);

                server
                    .delete(&format!("/api/tasks/{id}"))
                    .add_header(header::COOKIE, owner)
                    .await
                    .assert_status_ok();
            });
        }
    }

    describe "quests" {
        it "seeds daily quests and completes one" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;

                let listed = server
                    .get("/api/quests/daily")
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                let quests = listed["quests"].as_array().unwrap();
                assert!(!quests.is_empty());
                assert_eq!(listed["extra_quests"], 0);

                let quest = &quests[0];
                let reward = quest["xp_reward"].as_u64().unwrap();
                let path = format!("/api/quest-actions/{}/complete", quest["id"].as_str().unwrap());

                let done = server
                    .post(&path)
                    .add_query_param("quest_type", "daily")
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                assert_eq!(done["xp_gained"], reward);

                let wrong_type = server
                    .post(&path)
                    .add_query_param("quest_type", "weekly")
                    .add_header(header::COOKIE, cookie)
                    .await;
                wrong_type.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(wrong_type.json::<Value>()["error"], "Quest not found");
            });
        }

        it "returns an empty list for unknown quest types" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;
                let listed = server
                    .get("/api/quests/legendary")
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(listed["quests"], json!([]));
            });
        }
    }

    describe "leaderboard" {
        it "ranks users by total XP" {
            tokio_test::block_on(async {
                let server = setup_server();
                let ada = signup(&server, "ada").await;
                signup(&server, "bob").await;

                let task = create_task(&server, &ada, 10.0).await;
                server
                    .patch(&format!("/api/tasks/{}/complete", task["id"].as_str().unwrap()))
                    .add_header(header::COOKIE, ada.clone())
                    .await
                    .assert_status_ok();

                let board = server
                    .get("/api/leaderboard/global")
                    .add_header(header::COOKIE, ada)
                    .await
                    .json::<Value>();
                assert_eq!(board["total_users"], 2);
                assert_eq!(board["current_user_rank"], 1);
                assert_eq!(board["leaderboard"][0]["username"], "ada");
            });
        }
    }

    describe "admin" {
        it "bootstraps the configured super-admin on first login" {
            tokio_test::block_on(async {
                let server = setup_server();
                let response = server
                    .post("/api/admin/login")
                    .json(&json!({ "username": "root", "password": "hunter2-admin" }))
                    .await;
                response.assert_status_ok();

                let set_cookie = response.header(header::SET_COOKIE);
                let set_cookie = set_cookie.to_str().unwrap();
                assert!(set_cookie.starts_with("qd4_admin_token="));
                assert!(set_cookie.contains("Max-Age=604800"));

                server
                    .post("/api/admin/login")
                    .json(&json!({ "username": "root", "password": "wrong" }))
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);

                server
                    .post("/api/admin/login")
                    .json(&json!({ "username": "mallory", "password": "hunter2-admin" }))
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);
            });
        }

        it "creates and lists global quests" {
            tokio_test::block_on(async {
                let server = setup_server();
                let login = server
                    .post("/api/admin/login")
                    .json(&json!({ "username": "root", "password": "hunter2-admin" }))
                    .await;
                let admin = session_cookie(&login);

                let created = server
                    .post("/api/admin/quests/global")
                    .add_header(header::COOKIE, admin.clone())
                    .json(&json!({ "title": "Community sprint", "xpReward": 250 }))
                    .await
                    .json::<Value>();
                assert_eq!(created["success"], true);
                assert_eq!(created["quest"]["xp_reward"], 250);
                assert_eq!(created["quest"]["category"], "productivity");

                server
                    .post("/api/admin/quests/global")
                    .add_header(header::COOKIE, admin.clone())
                    .json(&json!({ "title": "   " }))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);

                let listed = server
                    .get("/api/admin/quests/global")
                    .add_header(header::COOKIE, admin.clone())
                    .await
                    .json::<Value>();
                assert_eq!(listed["quests"].as_array().unwrap().len(), 1);

                let stats = server
                    .get("/api/admin/quests/stats")
                    .add_header(header::COOKIE, admin)
                    .await
                    .json::<Value>();
                assert_eq!(stats["total_global_quests"], 1);
                assert_eq!(stats["active_quests"], 1);
            });
        }

        it "rejects global quest rewards beyond the XP ceiling" {
            tokio_test::block_on(async {
                let server = setup_server();
                let login = server
                    .post("/api/admin/login")
                    .json(&json!({ "username": "root", "password": "hunter2-admin" }))
                    .await;
                server
                    .post("/api/admin/quests/global")
                    .add_header(header::COOKIE, session_cookie(&login))
                    .json(&json!({ "title": "Infinite sprint", "xp_reward": u64::MAX }))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            });
        }

        it "does not accept a user session" {
            tokio_test::block_on(async {
                let server = setup_server();
                let user = signup(&server, "ada").await;

                server
                    .get("/api/admin/quests/global")
                    .add_header(header::COOKIE, user)
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);

                server
                    .get("/api/admin/quests/global")
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);
            });
        }

        it "shows global quests to users as open" {
            tokio_test::block_on(async {
                let server = setup_server();
                let login = server
                    .post("/api/admin/login")
                    .json(&json!({ "username": "root", "password": "hunter2-admin" }))
                    .await;
                server
                    .post("/api/admin/quests/global")
                    .add_header(header::COOKIE, session_cookie(&login))
                    .json(&json!({ "title": "Community sprint" }))
                    .await
                    .assert_status_ok();

                let user = signup(&server, "ada").await;
                let listed = server
                    .get("/api/quests/global")
                    .add_header(header::COOKIE, user)
                    .await
                    .json::<Value>();
                assert_eq!(listed["quests"][0]["title"], "Community sprint");
                assert_eq!(listed["quests"][0]["completed"], false);
                assert_eq!(listed["quests"][0]["type"], "global");
                assert_eq!(listed["quests"][0]["target"], 1);
            });
        }
    }

    describe "focus sessions" {
        it "starts, completes once and shows up in history" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;

                let session = server
                    .post("/api/focus/start")
                    .add_header(header::COOKIE, cookie.clone())
                    .json(&json!({ "duration_minutes": 30 }))
                    .await
                    .json::<Value>();
                assert_eq!(session["duration_minutes"], 30);
                assert_eq!(session["xp_reward"], 60);
                let path = format!("/api/focus/{}/complete", session["id"].as_str().unwrap());

                let first = server
                    .post(&path)
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                assert_eq!(first["xp_gained"], 60);

                let again = server
                    .post(&path)
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                assert_eq!(again["xp_gained"], 0);

                let history = server
                    .get("/api/focus/history")
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(history[0]["completed"], true);
            });
        }

        it "defaults to 25 minutes and bounds the length" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;

                let session = server
                    .post("/api/focus/start")
                    .add_header(header::COOKIE, cookie.clone())
                    .json(&json!({}))
                    .await
                    .json::<Value>();
                assert_eq!(session["duration_minutes"], 25);

                server
                    .post("/api/focus/start")
                    .add_header(header::COOKIE, cookie)
                    .json(&json!({ "duration_minutes": 0 }))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);
            });
        }

        it "hides other users' sessions behind a 404" {
            tokio_test::block_on(async {
                let server = setup_server();
                let ada = signup(&server, "ada").await;
                let bob = signup(&server, "bob").await;

                let session = server
                    .post("/api/focus/start")
                    .add_header(header::COOKIE, ada)
                    .json(&json!({}))
                    .await
                    .json::<Value>();

                let response = server
                    .post(&format!("/api/focus/{}/complete", session["id"].as_str().unwrap()))
                    .add_header(header::COOKIE, bob.clone())
                    .await;
                response.assert_status(StatusCode::NOT_FOUND);
                assert_eq!(response.json::<Value>()["error"], "Session not found");

                server
                    .post("/api/focus/not-a-uuid/complete")
                    .add_header(header::COOKIE, bob)
                    .await
                    .assert_status(StatusCode::NOT_FOUND);
            });
        }
    }

    describe "boss challenges" {
        it "hands out one challenge per day and pays it once" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;

                let challenge = server
                    .get("/api/boss-challenge/today")
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                let again = server
                    .get("/api/boss-challenge/today")
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                assert_eq!(challenge["id"], again["id"]);

                let path = format!("/api/boss-challenge/{}/complete", challenge["id"].as_str().unwrap());
                let first = server
                    .post(&path)
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                assert_eq!(first["xp_gained"], challenge["xp_reward"]);

                let repeat = server
                    .post(&path)
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(repeat["xp_gained"], 0);
            });
        }

        it "requires a session" {
            tokio_test::block_on(async {
                let server = setup_server();
                server
                    .get("/api/boss-challenge/today")
                    .await
                    .assert_status(StatusCode::UNAUTHORIZED);
            });
        }
    }

    describe "analytics" {
        it "summarizes completed work on the dashboard" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;

                let task = server
                    .post("/api/tasks")
                    .add_header(header::COOKIE, cookie.clone())
                    .json(&json!({ "title": "Read", "skillTree": "Mind", "estimated_minutes": 10 }))
                    .await
                    .json::<Value>()["task"]
                    .clone();
                create_task(&server, &cookie, 5.0).await;
                server
                    .patch(&format!("/api/tasks/{}/complete", task["id"].as_str().unwrap()))
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .assert_status_ok();

                let session = server
                    .post("/api/focus/start")
                    .add_header(header::COOKIE, cookie.clone())
                    .json(&json!({ "duration_minutes": 15 }))
                    .await
                    .json::<Value>();
                server
                    .post(&format!("/api/focus/{}/complete", session["id"].as_str().unwrap()))
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .assert_status_ok();

                let body = server
                    .get("/api/analytics/dashboard?days=7")
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(body["window_days"], 7);
                assert_eq!(body["total_tasks"], 1);
                assert_eq!(body["pending_tasks"], 1);
                assert_eq!(body["total_focus_time"], 15);
                assert_eq!(body["skill_breakdown"]["Mind"], 1);
                assert_eq!(body["current_streak"], 1);
                assert_eq!(body["discipline_score"], 53);
                assert_eq!(body["weekly_data"].as_array().unwrap().len(), 7);
                assert_eq!(body["weekly_data"][6]["tasks"], 1);
            });
        }

        it "falls back to a 30 day window" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;
                let body = server
                    .get("/api/analytics/dashboard?days=0")
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(body["window_days"], 30);
                assert_eq!(body["current_level"], 1);
            });
        }
    }

    describe "backgrounds" {
        it "starts at the default and remembers updates" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;

                let initial = server
                    .get("/api/user/background")
                    .add_header(header::COOKIE, cookie.clone())
                    .await
                    .json::<Value>();
                assert_eq!(initial["background"], "default");

                let updated = server
                    .post("/api/user/background/update")
                    .add_header(header::COOKIE, cookie.clone())
                    .json(&json!({ "background": "gradient:aurora:neon-grid" }))
                    .await
                    .json::<Value>();
                assert_eq!(updated["success"], true);

                let current = server
                    .get("/api/user/background")
                    .add_header(header::COOKIE, cookie)
                    .await
                    .json::<Value>();
                assert_eq!(current["background"], "gradient:aurora:neon-grid");
            });
        }

        it "offers one generated option per palette" {
            tokio_test::block_on(async {
                let server = setup_server();
                let cookie = signup(&server, "ada").await;
                let body = server
                    .post("/api/user/background/generate")
                    .add_header(header::COOKIE, cookie)
                    .json(&json!({ "prompt": "aurora" }))
                    .await
                    .json::<Value>();
                let options = body["options"].as_array().unwrap();
                assert_eq!(options.len(), 3);
                assert!(options[0]["background"].as_str().unwrap().starts_with("gradient:aurora:"));
            });
        }
    }

    describe "mode items" {
        it "keeps items per mode and per user" {
            tokio_test::block_on(async {
                let server = setup_server();
                let ada = signup(&server, "ada").await;
                let bob = signup(&server, "bob").await;

                let created = server
                    .post("/api/modes/study/items")
                    .add_header(header::COOKIE, ada.clone())
                    .json(&json!({ "title": "Flashcards", "content": "  chapter 3  " }))
                    .await
                    .json::<Value>();
                assert_eq!(created["item"]["content"], "chapter 3");

                server
                    .post("/api/modes/study/items")
                    .add_header(header::COOKIE, ada.clone())
                    .json(&json!({ "content": "no title" }))
                    .await
                    .assert_status(StatusCode::BAD_REQUEST);

                let study = server
                    .get("/api/modes/study/items")
                    .add_header(header::COOKIE, ada.clone())
                    .await
                    .json::<Value>();
                assert_eq!(study["items"].as_array().unwrap().len(), 1);

                let work = server
                    .get("/api/modes/work/items")
                    .add_header(header::COOKIE, ada)
                    .await
                    .json::<Value>();
                assert!(work["items"].as_array().unwrap().is_empty());

                let other = server
                    .get("/api/modes/study/items")
                    .add_header(header::COOKIE, bob)
                    .await
                    .json::<Value>();
                assert!(other["items"].as_array().unwrap().is_empty());
            });
        }
    }
}
