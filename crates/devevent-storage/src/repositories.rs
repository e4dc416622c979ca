// Repository layer for database operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::*;

type Result<T> = std::result::Result<T, StorageError>;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(&self, input: CreateEventRow) -> Result<EventRow> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            "#,
        )
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.hook)
        .bind(&input.image)
        .bind(&input.overview)
        .bind(input.date)
        .bind(&input.time_from)
        .bind(&input.time_to)
        .bind(&input.venue)
        .bind(&input.mode)
        .bind(&input.about)
        .bind(&input.audience)
        .bind(&input.agenda)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_event_by_slug(&self, slug: &str) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            FROM events
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// All events, newest first.
    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            FROM events
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn update_event(&self, id: Uuid, input: UpdateEventRow) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET
                slug = COALESCE($2, slug),
                title = COALESCE($3, title),
                hook = COALESCE($4, hook),
                image = COALESCE($5, image),
                overview = COALESCE($6, overview),
                date = COALESCE($7, date),
                time_from = COALESCE($8, time_from),
                time_to = COALESCE($9, time_to),
                venue = COALESCE($10, venue),
                mode = COALESCE($11, mode),
                about = COALESCE($12, about),
                status = COALESCE($13, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&input.slug)
        .bind(&input.title)
        .bind(&input.hook)
        .bind(&input.image)
        .bind(&input.overview)
        .bind(input.date)
        .bind(&input.time_from)
        .bind(&input.time_to)
        .bind(&input.venue)
        .bind(&input.mode)
        .bind(&input.about)
        .bind(&input.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Relationship references (ordered UUID arrays)
    // ============================================

    /// Append an audience reference unless it is already present.
    pub async fn attach_audience_ref(
        &self,
        event_id: Uuid,
        audience_id: Uuid,
    ) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET audience = CASE
                WHEN audience @> ARRAY[$2::uuid] THEN audience
                ELSE array_append(audience, $2::uuid)
            END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(audience_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn detach_audience_ref(
        &self,
        event_id: Uuid,
        audience_id: Uuid,
    ) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET audience = array_remove(audience, $2::uuid),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(audience_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn attach_agenda_ref(
        &self,
        event_id: Uuid,
        agenda_id: Uuid,
    ) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET agenda = CASE
                WHEN agenda @> ARRAY[$2::uuid] THEN agenda
                ELSE array_append(agenda, $2::uuid)
            END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(agenda_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn detach_agenda_ref(
        &self,
        event_id: Uuid,
        agenda_id: Uuid,
    ) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET agenda = array_remove(agenda, $2::uuid),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, slug, title, hook, image, overview, date, time_from, time_to, venue, mode, about, audience, agenda, status, created_at, updated_at
            "#,
        )
        .bind(event_id)
        .bind(agenda_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Agenda items
    // ============================================

    pub async fn create_agenda(&self, input: CreateAgendaRow) -> Result<AgendaRow> {
        let row = sqlx::query_as::<_, AgendaRow>(
            r#"
            INSERT INTO agenda_items (event_id, title, description, time_from, time_to, speaker, location)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, event_id, title, description, time_from, time_to, speaker, location, created_at, updated_at
            "#,
        )
        .bind(input.event_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.time_from)
        .bind(&input.time_to)
        .bind(&input.speaker)
        .bind(&input.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Resolve agenda references in the order the event lists them.
    /// Dangling identifiers are silently skipped.
    pub async fn list_agenda_by_ids(&self, ids: &[Uuid]) -> Result<Vec<AgendaRow>> {
        let rows = sqlx::query_as::<_, AgendaRow>(
            r#"
            SELECT a.id, a.event_id, a.title, a.description, a.time_from, a.time_to, a.speaker, a.location, a.created_at, a.updated_at
            FROM agenda_items a
            JOIN unnest($1::uuid[]) WITH ORDINALITY AS ref(id, ord) ON a.id = ref.id
            ORDER BY ref.ord
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Audiences
    // ============================================

    pub async fn create_audience(&self, input: CreateAudienceRow) -> Result<AudienceRow> {
        let row = sqlx::query_as::<_, AudienceRow>(
            r#"
            INSERT INTO audiences (category, description)
            VALUES ($1, $2)
            RETURNING id, category, description
            "#,
        )
        .bind(&input.category)
        .bind(&input.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// All audiences, ascending by category.
    pub async fn list_audiences(&self) -> Result<Vec<AudienceRow>> {
        let rows = sqlx::query_as::<_, AudienceRow>(
            r#"
            SELECT id, category, description
            FROM audiences
            ORDER BY category ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Resolve audience references in the order the event lists them.
    /// Dangling identifiers are silently skipped.
    pub async fn list_audiences_by_ids(&self, ids: &[Uuid]) -> Result<Vec<AudienceRow>> {
        let rows = sqlx::query_as::<_, AudienceRow>(
            r#"
            SELECT a.id, a.category, a.description
            FROM audiences a
            JOIN unnest($1::uuid[]) WITH ORDINALITY AS ref(id, ord) ON a.id = ref.id
            ORDER BY ref.ord
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    // ============================================
    // Bookings
    // ============================================

    pub async fn create_booking(&self, input: CreateBookingRow) -> Result<BookingRow> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (event_id, email, status)
            VALUES ($1, $2, $3)
            RETURNING id, event_id, email, status, created_at, updated_at
            "#,
        )
        .bind(input.event_id)
        .bind(&input.email)
        .bind(&input.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// All bookings, newest first.
    pub async fn list_bookings(&self) -> Result<Vec<BookingRow>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, event_id, email, status, created_at, updated_at
            FROM bookings
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Secondary access path: bookings for one email, newest first.
    pub async fn list_bookings_by_email(&self, email: &str) -> Result<Vec<BookingRow>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, event_id, email, status, created_at, updated_at
            FROM bookings
            WHERE email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
