pub mod sys_files;
