use super::{Store, StoreError};
use crate::models::{CourseSection, ProfessorRating, RatedSection, Term};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::BTreeSet;

const SECTION_COLUMNS: &str = "c.courseNumber, c.courseTitle, c.courseTopic, c.section, c.daysAndTimes, \
     c.room, c.instructor, c.instructionMode, c.meetingDates";

fn section_from_row(row: &Row<'_>) -> rusqlite::Result<CourseSection> {
    Ok(CourseSection {
        course_number: row.get(0)?,
        course_title: row.get(1)?,
        course_topic: row.get(2)?,
        section: row.get(3)?,
        days_and_times: row.get(4)?,
        room: row.get(5)?,
        instructor: row.get(6)?,
        instruction_mode: row.get(7)?,
        meeting_dates: row.get(8)?,
    })
}

fn rated_from_row(row: &Row<'_>) -> rusqlite::Result<RatedSection> {
    Ok(RatedSection {
        section: section_from_row(row)?,
        avg_rating: row.get(9)?,
        rating_count: row.get(10)?,
    })
}

fn insert_row(conn: &Connection, s: &CourseSection) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO courses (courseTitle, courseTopic, section, daysAndTimes, room, instructor, instructionMode, meetingDates)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            s.course_title,
            s.course_topic,
            s.section,
            s.days_and_times,
            s.room,
            s.instructor,
            s.instruction_mode,
            s.meeting_dates,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

impl Store {
    /// Inserts a section and returns its generated course number.
    pub fn insert_section(&self, s: &CourseSection) -> Result<i64, StoreError> {
        self.with_conn(|conn| Ok(insert_row(conn, s)?))
    }

    /// Inserts every section in one transaction; a failing row leaves the
    /// table untouched.
    pub fn insert_sections(&self, sections: &[CourseSection]) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            for s in sections {
                insert_row(&tx, s)?;
            }
            tx.commit()?;
            Ok(sections.len())
        })
    }

    pub fn all_sections(&self) -> Result<Vec<CourseSection>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM courses c ORDER BY c.courseNumber",
                SECTION_COLUMNS
            ))?;
            let rows = stmt.query_map([], section_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    /// Sections whose meeting dates fall in `term`; `None` keeps every section.
    pub fn sections_in_term(&self, term: Option<Term>) -> Result<Vec<CourseSection>, StoreError> {
        Ok(self
            .all_sections()?
            .into_iter()
            .filter(|s| term.is_none_or(|t| t.matches_meeting_dates(&s.meeting_dates)))
            .collect())
    }

    /// Sections of one title in `term`, ordered by section code.
    pub fn term_sections(&self, title: &str, term: Option<Term>) -> Result<Vec<CourseSection>, StoreError> {
        let mut out: Vec<CourseSection> = self
            .sections_in_term(term)?
            .into_iter()
            .filter(|s| s.course_title == title)
            .collect();
        out.sort_by(|a, b| a.section.cmp(&b.section));
        Ok(out)
    }

    /// Distinct titles offered in `term`, sorted.
    pub fn term_titles(&self, term: Option<Term>) -> Result<Vec<String>, StoreError> {
        let titles: BTreeSet<String> = self
            .sections_in_term(term)?
            .into_iter()
            .map(|s| s.course_title)
            .collect();
        Ok(titles.into_iter().collect())
    }

    pub fn distinct_titles(&self) -> Result<Vec<String>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT DISTINCT courseTitle FROM courses ORDER BY courseTitle")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    /// Sections of a title with their instructor's rating, best rated first
    /// and unrated last.
    pub fn sections_by_title(&self, title: &str) -> Result<Vec<RatedSection>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {}, pr.avgRating, pr.ratingCount
                 FROM courses c LEFT JOIN professorRating pr ON c.instructor = pr.instructor
                 WHERE c.courseTitle = ?1
                 ORDER BY pr.avgRating IS NULL, pr.avgRating DESC, c.courseNumber",
                SECTION_COLUMNS
            ))?;
            let rows = stmt.query_map(params![title], rated_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    pub fn sections_by_instructor(&self, instructor: &str) -> Result<Vec<RatedSection>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {}, pr.avgRating, pr.ratingCount
                 FROM courses c LEFT JOIN professorRating pr ON c.instructor = pr.instructor
                 WHERE c.instructor = ?1
                 ORDER BY c.courseNumber",
                SECTION_COLUMNS
            ))?;
            let rows = stmt.query_map(params![instructor], rated_from_row)?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    /// Rated instructors, sorted by name.
    pub fn instructors(&self) -> Result<Vec<String>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT instructor FROM professorRating ORDER BY instructor")?;
            let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
            Ok(rows.collect::<Result<Vec<_>, _>>()?)
        })
    }

    pub fn professor_rating(&self, instructor: &str) -> Result<Option<ProfessorRating>, StoreError> {
        self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT id, instructor, ratingCount, ratingSum, avgRating FROM professorRating WHERE instructor = ?1",
                    params![instructor],
                    |row| {
                        Ok(ProfessorRating {
                            id: row.get(0)?,
                            instructor: row.get(1)?,
                            rating_count: row.get(2)?,
                            rating_sum: row.get(3)?,
                            avg_rating: row.get(4)?,
                        })
                    },
                )
                .optional()?)
        })
    }

    /// Adds a zero-count rating row for every distinct instructor that has
    /// none yet. Returns how many were added.
    pub fn seed_professor_ratings(&self) -> Result<usize, StoreError> {
        self.with_conn(|conn| {
            let added = conn.execute(
                "INSERT INTO professorRating (instructor, ratingCount, ratingSum, avgRating)
                 SELECT DISTINCT c.instructor, 0, 0, NULL FROM courses c
                 WHERE c.instructor <> ''
                   AND NOT EXISTS (SELECT 1 FROM professorRating pr WHERE pr.instructor = c.instructor)",
                [],
            )?;
            Ok(added)
        })
    }
}
