//! Seed rows and seeding configuration.

use chrono::NaiveDate;
use schoolhub_models::{RecordStatus, TeacherId};

pub struct TeacherSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub subject_specialization: String,
    pub employee_id: String,
    pub date_of_joining: NaiveDate,
    pub status: RecordStatus,
}

pub struct StudentSeed {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub roll_number: String,
    pub class_grade: String,
    pub date_of_birth: NaiveDate,
    pub admission_date: NaiveDate,
    pub status: RecordStatus,
    pub assigned_teacher: Option<TeacherId>,
}

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub teachers: usize,
    pub students_per_teacher: usize,
    /// Students created without a teacher
    pub unassigned_students: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            teachers: 10,
            students_per_teacher: 15,
            unassigned_students: 5,
        }
    }
}

impl SeedConfig {
    pub fn new(teachers: usize) -> Self {
        Self {
            teachers,
            ..Default::default()
        }
    }

    pub fn with_students_per_teacher(mut self, count: usize) -> Self {
        self.students_per_teacher = count;
        self
    }

    pub fn with_unassigned_students(mut self, count: usize) -> Self {
        self.unassigned_students = count;
        self
    }

    pub fn total_students(&self) -> usize {
        self.teachers * self.students_per_teacher + self.unassigned_students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_students() {
        let config = SeedConfig::new(4)
            .with_students_per_teacher(3)
            .with_unassigned_students(2);
        assert_eq!(config.total_students(), 14);
    }
}
