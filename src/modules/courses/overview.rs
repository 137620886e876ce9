use std::collections::HashMap;

use chrono::NaiveDate;
use journal_core::{AssignmentId, CourseId};
use journal_models::{Course, CourseOverview, DisciplineOverview, LatestGrade, OverviewRow};

/// Folds the three aggregation stages into the nested per-course view.
///
/// Courses keep their input order and disciplines the order of `rows`. A
/// discipline taught by several teachers carries the grade of the most recent
/// exam across all of its assignments.
pub fn assemble(
    courses: Vec<Course>,
    rows: Vec<OverviewRow>,
    grades: Vec<LatestGrade>,
) -> Vec<CourseOverview> {
    let grades: HashMap<AssignmentId, LatestGrade> = grades
        .into_iter()
        .map(|grade| (grade.assignment_id, grade))
        .collect();

    let mut disciplines: HashMap<CourseId, Vec<(DisciplineOverview, Option<NaiveDate>)>> =
        HashMap::new();

    for row in rows {
        let entries = disciplines.entry(row.course_id).or_default();

        let index = match entries
            .iter()
            .position(|(discipline, _)| discipline.discipline_id == row.discipline_id)
        {
            Some(index) => index,
            None => {
                entries.push((
                    DisciplineOverview {
                        discipline_id: row.discipline_id,
                        discipline_name: row.discipline_name.clone(),
                        teachers: Vec::new(),
                        grade: None,
                    },
                    None,
                ));
                entries.len() - 1
            }
        };

        let (discipline, graded_on) = &mut entries[index];
        discipline.teachers.push(row.teacher());

        let newer = grades
            .get(&row.assignment_id)
            .filter(|latest| graded_on.is_none_or(|date| latest.exam_date > date));
        if let Some(latest) = newer {
            discipline.grade = Some(latest.grade);
            *graded_on = Some(latest.exam_date);
        }
    }

    courses
        .into_iter()
        .map(|course| CourseOverview {
            disciplines: disciplines
                .remove(&course.id)
                .unwrap_or_default()
                .into_iter()
                .map(|(discipline, _)| discipline)
                .collect(),
            course_id: course.id,
            course_name: course.name,
            course_number: course.number,
        })
        .collect()
}
