use crate::validation::{Field, ValidationError, check_len, normalize_code, require};

/// A validated course ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub course_number: String,
    pub dept: String,
    pub name: String,
    pub level: Option<i32>,
    pub hours: Option<i32>,
    pub description: Option<String>,
}

/// A course as submitted by a client, before validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseDraft {
    pub course_number: Option<String>,
    pub dept: Option<String>,
    pub name: Option<String>,
    pub level: Option<i32>,
    pub hours: Option<i32>,
    pub description: Option<String>,
}

impl CourseDraft {
    /// Checks required fields and column widths, normalizing the key and department
    pub fn validate(self) -> Result<NewCourse, ValidationError> {
        let dept = normalize_code(&require(Field::Dept, self.dept)?);
        let course_number = normalize_code(&require(Field::CourseNumber, self.course_number)?);
        let name = require(Field::Name, self.name)?;

        check_len(Field::CourseNumber, &course_number)?;
        check_len(Field::Dept, &dept)?;
        check_len(Field::Name, &name)?;
        if let Some(description) = &self.description {
            check_len(Field::Description, description)?;
        }

        Ok(NewCourse {
            course_number,
            dept,
            name,
            level: self.level,
            hours: self.hours,
            description: self.description,
        })
    }
}

/// A partial update as submitted by a client.
///
/// The outer `Option` tells whether a field was present at all; the inner one
/// carries an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatchDraft {
    pub course_number: Option<Option<String>>,
    pub dept: Option<Option<String>>,
    pub name: Option<Option<String>>,
    pub level: Option<Option<i32>>,
    pub hours: Option<Option<i32>>,
    pub description: Option<Option<String>>,
}

impl CoursePatchDraft {
    /// Validates the patch against the key it is addressed to.
    ///
    /// A `Course_Number` that is `null`, blank, or equal to `key` (after
    /// normalization) is accepted and ignored; any other value is a
    /// [`ValidationError::KeyChange`].
    pub fn validate(self, key: &str) -> Result<CoursePatch, ValidationError> {
        let course_number = self
            .course_number
            .flatten()
            .map(|number| normalize_code(&number))
            .filter(|number| !number.is_empty());
        if let Some(number) = &course_number
            && *number != normalize_code(key)
        {
            return Err(ValidationError::KeyChange);
        }

        let dept = match self.dept {
            None => None,
            Some(dept) => {
                let dept = normalize_code(&require(Field::Dept, dept)?);
                check_len(Field::Dept, &dept)?;
                Some(dept)
            }
        };

        let name = match self.name {
            None => None,
            Some(name) => {
                let name = require(Field::Name, name)?;
                check_len(Field::Name, &name)?;
                Some(name)
            }
        };

        if let Some(Some(description)) = &self.description {
            check_len(Field::Description, description)?;
        }

        Ok(CoursePatch {
            course_number,
            dept,
            name,
            level: self.level,
            hours: self.hours,
            description: self.description,
        })
    }
}

/// A validated partial update. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub course_number: Option<String>,
    pub dept: Option<String>,
    pub name: Option<String>,
    pub level: Option<Option<i32>>,
    pub hours: Option<Option<i32>>,
    pub description: Option<Option<String>>,
}

impl CoursePatch {
    /// True when the patch would not change any column
    pub fn is_empty(&self) -> bool {
        self.dept.is_none()
            && self.name.is_none()
            && self.level.is_none()
            && self.hours.is_none()
            && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> CourseDraft {
        CourseDraft {
            course_number: Some("15-122".to_string()),
            dept: Some("cs".to_string()),
            name: Some("Intro".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_normalizes_codes() {
        let course = CourseDraft {
            course_number: Some(" 101a ".to_string()),
            ..draft()
        }
        .validate()
        .unwrap();

        assert_eq!(course.course_number, "101A");
        assert_eq!(course.dept, "CS");
        assert_eq!(course.name, "Intro");
        assert_eq!(course.level, None);
        assert_eq!(course.description, None);
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let missing_dept = CourseDraft {
            dept: None,
            ..draft()
        };
        assert_eq!(
            missing_dept.validate(),
            Err(ValidationError::Missing(Field::Dept))
        );

        let blank_number = CourseDraft {
            course_number: Some("  ".to_string()),
            ..draft()
        };
        assert_eq!(
            blank_number.validate(),
            Err(ValidationError::Missing(Field::CourseNumber))
        );

        let missing_name = CourseDraft {
            name: None,
            ..draft()
        };
        assert_eq!(
            missing_name.validate(),
            Err(ValidationError::Missing(Field::Name))
        );
    }

    #[test]
    fn test_validate_checks_widths() {
        let long_description = CourseDraft {
            description: Some("x".repeat(256)),
            ..draft()
        };
        assert_eq!(
            long_description.validate(),
            Err(ValidationError::TooLong {
                field: Field::Description,
                max: 255
            })
        );
    }

    #[test]
    fn test_patch_rejects_key_change() {
        let patch = CoursePatchDraft {
            course_number: Some(Some("15-213".to_string())),
            ..Default::default()
        };
        assert_eq!(patch.validate("15-122"), Err(ValidationError::KeyChange));
    }

    #[test]
    fn test_patch_treats_blank_key_as_absent() {
        for number in [None, Some(String::new()), Some("  ".to_string())] {
            let patch = CoursePatchDraft {
                course_number: Some(number),
                hours: Some(Some(4)),
                ..Default::default()
            }
            .validate("15-122")
            .unwrap();

            assert_eq!(patch.course_number, None);
            assert_eq!(patch.hours, Some(Some(4)));
        }
    }

    #[test]
    fn test_patch_accepts_same_key() {
        let patch = CoursePatchDraft {
            course_number: Some(Some("cs101".to_string())),
            dept: Some(Some("math".to_string())),
            ..Default::default()
        }
        .validate("CS101")
        .unwrap();

        assert_eq!(patch.course_number.as_deref(), Some("CS101"));
        assert_eq!(patch.dept.as_deref(), Some("MATH"));
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_patch_null_semantics() {
        let patch = CoursePatchDraft {
            description: Some(None),
            ..Default::default()
        }
        .validate("CS101")
        .unwrap();
        assert_eq!(patch.description, Some(None));

        let null_name = CoursePatchDraft {
            name: Some(None),
            ..Default::default()
        };
        assert_eq!(
            null_name.validate("CS101"),
            Err(ValidationError::Missing(Field::Name))
        );
    }

    #[test]
    fn test_patch_with_only_key_is_empty() {
        let patch = CoursePatchDraft {
            course_number: Some(Some("CS101".to_string())),
            ..Default::default()
        }
        .validate("cs101")
        .unwrap();
        assert!(patch.is_empty());
    }
}
