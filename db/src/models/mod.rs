pub mod course;
pub mod course_material;
pub mod course_student;
pub mod lesson;
pub mod rating;
pub mod student;
pub mod teacher;

pub use course::Entity as Course;
pub use course_material::Entity as CourseMaterial;
pub use course_student::Entity as CourseStudent;
pub use lesson::Entity as Lesson;
pub use rating::Entity as Rating;
pub use student::Entity as Student;
pub use teacher::Entity as Teacher;
