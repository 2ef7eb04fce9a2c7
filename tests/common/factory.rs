use uuid::Uuid;

use hotel_listing::models::{Country, CreateUser, Hotel, Role, User};
use hotel_listing::services::AuthService;
use hotel_listing::state::AppState;

/// Authentication info for tests
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

impl<'a> Factory<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Create a user with the given role and return auth info
    pub async fn create_user_with_role(&self, role: Role) -> TestAuth {
        let email = format!("test-{}@example.com", Uuid::new_v4());
        let user = self
            .create_user_with_email(&email, "TestPassword123!", role)
            .await;

        let token = AuthService::generate_token(&user, &self.state.config).unwrap();

        TestAuth {
            user_id: user.id,
            email,
            token,
        }
    }

    pub async fn create_user(&self) -> TestAuth {
        self.create_user_with_role(Role::User).await
    }

    pub async fn create_admin(&self) -> TestAuth {
        self.create_user_with_role(Role::Administrator).await
    }

    /// Create a user with specific credentials
    pub async fn create_user_with_email(&self, email: &str, password: &str, role: Role) -> User {
        let input = CreateUser {
            email: email.to_string(),
            password: password.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone_number: None,
            roles: vec![role],
        };

        let password_hash = AuthService::hash_password(password).unwrap();
        let user = User::new(&input, &password_hash);

        let mut uow = self.state.unit_of_work();
        uow.users().insert(user.clone()).await.unwrap();
        uow.save().await.unwrap();

        user
    }

    /// Create a country and return it with its assigned id
    pub async fn create_country(&self, name: &str, short_name: &str) -> Country {
        let mut country = Country::new(name, short_name);

        let mut uow = self.state.unit_of_work();
        let ticket = uow.countries().insert(country.clone()).await.unwrap();
        uow.save().await.unwrap();

        country.id = ticket.id().unwrap();
        country
    }

    /// Create a hotel in `country_id` and return it with its assigned id
    pub async fn create_hotel(&self, name: &str, rating: f64, country_id: i32) -> Hotel {
        let mut hotel = Hotel::new(name, format!("Calle {}", name), rating, country_id);

        let mut uow = self.state.unit_of_work();
        let ticket = uow.hotels().insert(hotel.clone()).await.unwrap();
        uow.save().await.unwrap();

        hotel.id = ticket.id().unwrap();
        hotel
    }
}
