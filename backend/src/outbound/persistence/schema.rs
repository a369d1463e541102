//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match the migrations under `backend/migrations/` exactly; regenerate
//! with `diesel print-schema` after schema changes.

diesel::table! {
    /// Courses owned by instructors.
    courses (id) {
        id -> Uuid,
        /// Owning instructor's user id.
        user_id -> Uuid,
        title -> Varchar,
        /// Price in minor currency units; null while unpriced.
        price_cents -> Nullable<Int4>,
        is_published -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Chapters within a course, ordered by `position`.
    chapters (id) {
        id -> Uuid,
        course_id -> Uuid,
        title -> Varchar,
        position -> Int4,
        is_published -> Bool,
        is_free -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Proof of purchase, unique per (user, course).
    purchases (id) {
        id -> Uuid,
        user_id -> Uuid,
        course_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user chapter completion flags, unique per (user, chapter).
    user_progress (id) {
        id -> Uuid,
        user_id -> Uuid,
        chapter_id -> Uuid,
        is_completed -> Bool,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only course ratings, unique per (user, course).
    ratings (id) {
        id -> Uuid,
        user_id -> Uuid,
        course_id -> Uuid,
        score -> Int2,
        message -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Instructor profiles keyed by user id.
    profiles (user_id) {
        user_id -> Uuid,
        bio -> Nullable<Text>,
        banner_image_url -> Nullable<Text>,
        cv_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(chapters -> courses (course_id));
diesel::joinable!(purchases -> courses (course_id));
diesel::joinable!(ratings -> courses (course_id));
diesel::joinable!(user_progress -> chapters (chapter_id));

diesel::allow_tables_to_appear_in_same_query!(
    courses,
    chapters,
    purchases,
    user_progress,
    ratings,
    profiles,
);
