use uuid::Uuid;

use taskflow::models::{
    Comment, CreateComment, CreateProject, CreateTask, CreateUser, Project, ProjectMember,
    ProjectRole, Task, TaskPriority, User,
};
use taskflow::repositories::{
    CommentRepository, ProjectRepository, TaskRepository, UserRepository,
};
use taskflow::services::AuthService;
use taskflow::state::AppState;

/// Authentication info for tests
#[allow(dead_code)]
pub struct TestAuth {
    pub user_id: Uuid,
    pub email: String,
    pub token: String,
}

impl TestAuth {
    /// Get the Authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Factory for creating test data
pub struct Factory<'a> {
    state: &'a AppState,
}

#[allow(dead_code)]
impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a test user and return auth info
    pub async fn create_user(&self) -> TestAuth {
        let unique_id = Uuid::new_v4();
        let email = format!("test-{}@example.com", unique_id);
        let password = "TestPassword123!";

        let input = CreateUser {
            email: email.clone(),
            password: password.to_string(),
            name: format!("Test User {}", unique_id),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        let user = UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap();

        let token = AuthService::generate_token(user.id, &email, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    /// Create a test user with specific email and password
    pub async fn create_user_with_email(&self, email: &str, password: &str) -> User {
        let input = CreateUser {
            email: email.to_string(),
            password: password.to_string(),
            name: "Test User".to_string(),
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        UserRepository::create(&self.state.db, &input, &password_hash)
            .await
            .unwrap()
    }

    /// Create a test project (the owner membership comes with it)
    pub async fn create_project(&self, owner_id: Uuid) -> Project {
        let input = CreateProject {
            name: format!("Test Project {}", Uuid::new_v4()),
            description: "Test project description".to_string(),
        };

        ProjectRepository::create(&self.state.db, owner_id, &input)
            .await
            .unwrap()
    }

    /// Create a test project with specific name
    pub async fn create_project_with_name(&self, owner_id: Uuid, name: &str) -> Project {
        let input = CreateProject {
            name: name.to_string(),
            description: String::new(),
        };

        ProjectRepository::create(&self.state.db, owner_id, &input)
            .await
            .unwrap()
    }

    /// Create a fresh user and add them to a project with the given role
    pub async fn create_member(&self, project_id: Uuid, role: ProjectRole) -> TestAuth {
        let auth = self.create_user().await;

        ProjectRepository::add_member(&self.state.db, project_id, auth.user_id, role)
            .await
            .unwrap();

        auth
    }

    /// Look up the membership rows of a project
    pub async fn list_members(&self, project_id: Uuid) -> Vec<ProjectMember> {
        ProjectRepository::list_members(&self.state.db, project_id)
            .await
            .unwrap()
    }

    /// Create a test task
    pub async fn create_task(&self, project_id: Uuid) -> Task {
        let input = CreateTask {
            title: format!("Test Task {}", Uuid::new_v4()),
            description: "Test task description".to_string(),
            priority: TaskPriority::Medium,
            assignee_id: None,
        };

        TaskRepository::create(&self.state.db, project_id, &input)
            .await
            .unwrap()
    }

    /// Create a test task with specific title and priority
    pub async fn create_task_with(
        &self,
        project_id: Uuid,
        title: &str,
        priority: TaskPriority,
        assignee_id: Option<Uuid>,
    ) -> Task {
        let input = CreateTask {
            title: title.to_string(),
            description: String::new(),
            priority,
            assignee_id,
        };

        TaskRepository::create(&self.state.db, project_id, &input)
            .await
            .unwrap()
    }

    /// Create a test comment
    pub async fn create_comment(&self, task_id: Uuid, author_id: Uuid, content: &str) -> Comment {
        let input = CreateComment {
            content: content.to_string(),
        };

        CommentRepository::create(&self.state.db, task_id, author_id, &input)
            .await
            .unwrap()
    }
}
