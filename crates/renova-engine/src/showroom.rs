//! Showroom session service
//!
//! Public pages read through the backend and fall back to the default
//! dataset when it is unreachable. Contact forms and testimonial submissions
//! fall back to in-session state, which admin reads list alongside the
//! defaults. Admin writes require an ADMIN user and validated input, and
//! surface every error.

use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use renova_core::catalog::{self, BrandFilter, DashboardStats, InboxFilter};
use renova_core::core_types::schema::EVENT_FALLBACK;
use renova_core::defaults;
use renova_core::errors::{ExError, ExErrorKind, Result};
use renova_core::model::{
    AboutData, Car, CarDraft, CarPatch, Entity, ImageToken, InboxMessage, InboxMessageDraft,
    NewsPost, NewsPostDraft, NewsPostPatch, Testimonial, TestimonialDraft, TestimonialPatch, User,
};
use renova_core::ops::inbox_ops::{self, GeneralInquiry, TestDriveRequest};
use renova_core::ops::memory::order_for_listing;
use renova_core::ops::testimonial_ops::{self, TestimonialSubmission};
use renova_core::ops::{news_ops, require_admin, AccountService, Repository};
use renova_core::rules::Validate;
use renova_core_types::Sensitive;
use uuid::Uuid;

use crate::backend::Backend;

/// Records accepted while the backend was unreachable
#[derive(Debug, Default)]
struct SessionState {
    inbox: Vec<InboxMessage>,
    testimonials: Vec<Testimonial>,
}

pub struct Showroom {
    backend: Backend,
    accounts: AccountService,
    user: Mutex<Option<User>>,
    session: Mutex<SessionState>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn local_id() -> String {
    format!("local-{}", Uuid::now_v7())
}

fn lock_error() -> ExError {
    ExError::new(ExErrorKind::Internal).with_message("showroom state lock poisoned")
}

fn log_fallback(op: &str, collection: &str, err: &ExError) {
    tracing::warn!(
        op,
        collection,
        event = EVENT_FALLBACK,
        err_code = err.code(),
        "backend unavailable, serving fallback data"
    );
}

/// List a collection, serving `fallback` when the backend is unreachable
async fn list_or<E: Entity>(
    repo: &dyn Repository<E>,
    fallback: impl FnOnce() -> Vec<E>,
) -> Result<Vec<E>> {
    match repo.list().await {
        Ok(records) => Ok(records),
        Err(err) if err.is_backend_unavailable() => {
            log_fallback("list", E::COLLECTION.table(), &err);
            Ok(order_for_listing(fallback()))
        }
        Err(err) => Err(err),
    }
}

impl Showroom {
    pub fn new(backend: Backend, admin_email: impl Into<String>) -> Self {
        let accounts = AccountService::new(
            backend.users.clone(),
            backend.identity.clone(),
            admin_email,
        );
        Self {
            backend,
            accounts,
            user: Mutex::new(None),
            session: Mutex::new(SessionState::default()),
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    fn set_user(&self, user: Option<User>) -> Result<()> {
        *self.user.lock().map_err(|_| lock_error())? = user;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>> {
        Ok(self.user.lock().map_err(|_| lock_error())?.clone())
    }

    fn admin(&self) -> Result<User> {
        let user = self.current_user()?;
        require_admin(user.as_ref()).cloned()
    }

    // ========== Accounts ==========

    pub async fn sign_up(
        &self,
        email: &str,
        password: &Sensitive<String>,
        name: &str,
    ) -> Result<User> {
        let user = self.accounts.sign_up(email, password, name).await?;
        self.set_user(Some(user.clone()))?;
        Ok(user)
    }

    pub async fn sign_in(&self, email: &str, password: &Sensitive<String>) -> Result<User> {
        let user = self.accounts.sign_in(email, password).await?;
        tracing::info!(op = "sign_in", entity_id = %user.id, role = ?user.role, "signed in");
        self.set_user(Some(user.clone()))?;
        Ok(user)
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.accounts.sign_out().await?;
        self.set_user(None)
    }

    /// Pick up a session the identity provider still holds
    pub async fn restore_session(&self) -> Result<Option<User>> {
        let user = self.accounts.current_user().await?;
        self.set_user(user.clone())?;
        Ok(user)
    }

    // ========== Public catalog ==========

    pub async fn cars(&self) -> Result<Vec<Car>> {
        list_or(self.backend.cars.as_ref(), defaults::cars).await
    }

    pub async fn car(&self, id: &str) -> Result<Option<Car>> {
        match self.backend.cars.get(id).await {
            Err(err) if err.is_backend_unavailable() => {
                log_fallback("get", "cars", &err);
                Ok(defaults::cars().into_iter().find(|car| car.id == id))
            }
            other => other,
        }
    }

    /// Cars matching a brand filter and a name/brand search, newest first
    pub async fn catalog(&self, brand: &BrandFilter, query: &str) -> Result<Vec<Car>> {
        let cars = self.cars().await?;
        Ok(catalog::filter_catalog(&cars, brand, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn brands(&self) -> Result<Vec<String>> {
        Ok(catalog::available_brands(&self.cars().await?))
    }

    pub async fn featured_cars(&self) -> Result<Vec<Car>> {
        let cars = self.cars().await?;
        Ok(catalog::featured(&cars).into_iter().cloned().collect())
    }

    pub async fn news(&self) -> Result<Vec<NewsPost>> {
        list_or(self.backend.news.as_ref(), defaults::news).await
    }

    pub async fn news_post(&self, id: &str) -> Result<Option<NewsPost>> {
        match self.backend.news.get(id).await {
            Err(err) if err.is_backend_unavailable() => {
                log_fallback("get", "news", &err);
                Ok(defaults::news().into_iter().find(|post| post.id == id))
            }
            other => other,
        }
    }

    pub async fn about(&self) -> Result<AboutData> {
        match self.backend.about.get().await {
            Err(err) if err.is_backend_unavailable() => {
                log_fallback("get", "about", &err);
                Ok(defaults::about())
            }
            other => other,
        }
    }

    /// Inbox listing; during an outage the defaults plus leads accepted
    /// in this session
    async fn all_inbox(&self) -> Result<Vec<InboxMessage>> {
        let pending = self.session.lock().map_err(|_| lock_error())?.inbox.clone();
        list_or(self.backend.inbox.as_ref(), move || {
            let mut records = defaults::inbox();
            records.extend(pending);
            records
        })
        .await
    }

    async fn all_testimonials(&self) -> Result<Vec<Testimonial>> {
        let pending = self.session.lock().map_err(|_| lock_error())?.testimonials.clone();
        list_or(self.backend.testimonials.as_ref(), move || {
            let mut records = defaults::testimonials();
            records.extend(pending);
            records
        })
        .await
    }

    /// Visible testimonials, newest first
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        let all = self.all_testimonials().await?;
        Ok(catalog::visible_testimonials(&all).into_iter().cloned().collect())
    }

    pub async fn latest_testimonials(&self, n: usize) -> Result<Vec<Testimonial>> {
        let all = self.all_testimonials().await?;
        Ok(catalog::latest_testimonials(&all, n).into_iter().cloned().collect())
    }

    pub async fn resolve_image(&self, token: &ImageToken) -> Result<String> {
        self.backend.images.resolve(token).await
    }

    // ========== Lead capture ==========

    async fn submit_message(&self, draft: InboxMessageDraft) -> Result<InboxMessage> {
        draft.validate()?;
        match self.backend.inbox.create(draft.clone()).await {
            Err(err) if err.is_backend_unavailable() => {
                log_fallback("create", "inbox", &err);
                let message = InboxMessage::from_draft(local_id(), Utc::now(), draft);
                self.session
                    .lock()
                    .map_err(|_| lock_error())?
                    .inbox
                    .push(message.clone());
                Ok(message)
            }
            other => other,
        }
    }

    pub async fn send_inquiry(&self, inquiry: GeneralInquiry) -> Result<InboxMessage> {
        self.submit_message(inbox_ops::general_inquiry(inquiry, today()))
            .await
    }

    pub async fn book_test_drive(&self, request: TestDriveRequest) -> Result<InboxMessage> {
        self.submit_message(inbox_ops::test_drive_booking(request, today()))
            .await
    }

    pub async fn submit_testimonial(
        &self,
        submission: TestimonialSubmission,
    ) -> Result<Testimonial> {
        let draft = testimonial_ops::submit(submission, today());
        draft.validate()?;
        match self.backend.testimonials.create(draft.clone()).await {
            Err(err) if err.is_backend_unavailable() => {
                log_fallback("create", "testimonials", &err);
                let testimonial = Testimonial::from_draft(local_id(), Utc::now(), draft);
                self.session
                    .lock()
                    .map_err(|_| lock_error())?
                    .testimonials
                    .push(testimonial.clone());
                Ok(testimonial)
            }
            other => other,
        }
    }

    // ========== Admin ==========

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        self.admin()?;
        let cars = self.cars().await?;
        let news = self.news().await?;
        let inbox = self.all_inbox().await?;
        Ok(DashboardStats::compute(&cars, &news, &inbox))
    }

    pub async fn search_inventory(&self, query: &str) -> Result<Vec<Car>> {
        self.admin()?;
        let cars = self.cars().await?;
        Ok(catalog::search_inventory(&cars, query)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn create_car(&self, draft: CarDraft) -> Result<Car> {
        self.admin()?;
        draft.validate()?;
        self.backend.cars.create(draft).await
    }

    pub async fn update_car(&self, id: &str, patch: CarPatch) -> Result<Car> {
        self.admin()?;
        patch.validate()?;
        self.backend.cars.update(id, patch).await
    }

    pub async fn delete_car(&self, id: &str) -> Result<()> {
        self.admin()?;
        self.backend.cars.delete(id).await
    }

    /// Create a post, deriving the excerpt from the content when blank
    pub async fn create_news(&self, draft: NewsPostDraft) -> Result<NewsPost> {
        self.admin()?;
        let draft = news_ops::prepare_draft(draft);
        draft.validate()?;
        self.backend.news.create(draft).await
    }

    pub async fn update_news(&self, id: &str, patch: NewsPostPatch) -> Result<NewsPost> {
        self.admin()?;
        let patch = news_ops::prepare_patch(patch);
        patch.validate()?;
        self.backend.news.update(id, patch).await
    }

    pub async fn delete_news(&self, id: &str) -> Result<()> {
        self.admin()?;
        self.backend.news.delete(id).await
    }

    pub async fn inbox(&self, filter: InboxFilter) -> Result<Vec<InboxMessage>> {
        self.admin()?;
        let messages = self.all_inbox().await?;
        Ok(catalog::filter_inbox(&messages, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn mark_message_read(&self, id: &str) -> Result<InboxMessage> {
        self.admin()?;
        self.backend.inbox.update(id, inbox_ops::mark_read()).await
    }

    pub async fn delete_message(&self, id: &str) -> Result<()> {
        self.admin()?;
        self.backend.inbox.delete(id).await
    }

    /// Every testimonial including hidden ones
    pub async fn manage_testimonials(&self) -> Result<Vec<Testimonial>> {
        self.admin()?;
        self.all_testimonials().await
    }

    pub async fn create_testimonial(&self, draft: TestimonialDraft) -> Result<Testimonial> {
        self.admin()?;
        draft.validate()?;
        self.backend.testimonials.create(draft).await
    }

    pub async fn update_testimonial(
        &self,
        id: &str,
        patch: TestimonialPatch,
    ) -> Result<Testimonial> {
        self.admin()?;
        patch.validate()?;
        self.backend.testimonials.update(id, patch).await
    }

    pub async fn set_testimonial_visibility(&self, id: &str, visible: bool) -> Result<Testimonial> {
        self.update_testimonial(id, testimonial_ops::set_visibility(visible))
            .await
    }

    pub async fn delete_testimonial(&self, id: &str) -> Result<()> {
        self.admin()?;
        self.backend.testimonials.delete(id).await
    }

    pub async fn update_about(&self, about: AboutData) -> Result<AboutData> {
        self.admin()?;
        self.backend.about.upsert(about).await
    }

    pub async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<ImageToken> {
        self.admin()?;
        self.backend.images.upload(bytes, file_name).await
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.admin()?;
        self.backend.users.list().await
    }
}
