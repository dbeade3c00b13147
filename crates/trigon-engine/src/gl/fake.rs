//! Recording `GlApi` implementation for tests.

use std::cell::{Cell, RefCell};

use super::GlApi;

/// One recorded GL call (plus the presentation calls issued by `FakeSurface`).
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateShader(u32, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    DeleteProgram(u32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateBuffer(u32),
    BindBuffer(u32, Option<u32>),
    BufferData { target: u32, bytes: Vec<u8>, usage: u32 },
    DeleteBuffer(u32),
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    EnableVertexAttribArray(u32),
    ClearColor([f32; 4]),
    Clear(u32),
    DrawArrays { mode: u32, first: i32, count: i32 },
    Swap,
    Poll,
}

impl Call {
    pub(crate) fn is_creation(&self) -> bool {
        matches!(
            self,
            Call::CreateShader(..)
                | Call::CompileShader(_)
                | Call::CreateProgram(_)
                | Call::LinkProgram(_)
                | Call::CreateVertexArray(_)
                | Call::CreateBuffer(_)
                | Call::BufferData { .. }
        )
    }
}

/// Fake driver.
///
/// Shader compilation fails when a statement line (an assignment, or an
/// `in`/`out` declaration) is missing its trailing `;`, the way a GLSL front end
/// reports a syntax error. Link fails when any attached stage failed to compile,
/// when fewer than two stages are attached, or when `fail_link` is set.
#[derive(Default)]
pub(crate) struct FakeGl {
    next_id: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    shaders: RefCell<Vec<FakeShader>>,
    attached: RefCell<Vec<(u32, u32)>>,
    linked_ok: RefCell<Vec<u32>>,
    pub(crate) fail_link: Cell<bool>,
    pub(crate) fail_buffer_alloc: Cell<bool>,
    pub(crate) info_log_override: RefCell<Option<String>>,
}

struct FakeShader {
    id: u32,
    source: String,
    compiled: Option<Result<(), String>>,
}

impl FakeGl {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub(crate) fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn alloc(&self) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn log_or(&self, fallback: String) -> String {
        self.info_log_override.borrow().clone().unwrap_or(fallback)
    }
}

fn check_glsl(source: &str) -> Result<(), String> {
    for (n, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }
        let statement = line.contains('=')
            || line.starts_with("in ")
            || line.starts_with("out ")
            || line.starts_with("layout");
        if statement && !line.ends_with(';') {
            return Err(format!("0:{}(1): error: syntax error, missing ';'", n + 1));
        }
    }
    Ok(())
}

impl GlApi for FakeGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;

    fn create_shader(&self, kind: u32) -> Result<u32, String> {
        let id = self.alloc();
        self.shaders.borrow_mut().push(FakeShader {
            id,
            source: String::new(),
            compiled: None,
        });
        self.record(Call::CreateShader(kind, id));
        Ok(id)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(s) = self.shaders.borrow_mut().iter_mut().find(|s| s.id == shader) {
            s.source = source.to_string();
        }
        self.record(Call::ShaderSource(shader));
    }

    fn compile_shader(&self, shader: u32) {
        if let Some(s) = self.shaders.borrow_mut().iter_mut().find(|s| s.id == shader) {
            s.compiled = Some(check_glsl(&s.source));
        }
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders
            .borrow()
            .iter()
            .find(|s| s.id == shader)
            .is_some_and(|s| matches!(s.compiled, Some(Ok(()))))
    }

    fn shader_info_log(&self, shader: u32) -> String {
        let log = self
            .shaders
            .borrow()
            .iter()
            .find(|s| s.id == shader)
            .and_then(|s| s.compiled.clone())
            .and_then(Result::err)
            .unwrap_or_default();
        self.log_or(log)
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn create_program(&self) -> Result<u32, String> {
        let id = self.alloc();
        self.record(Call::CreateProgram(id));
        Ok(id)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.attached.borrow_mut().push((program, shader));
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.attached
            .borrow_mut()
            .retain(|&(p, s)| !(p == program && s == shader));
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        let stages: Vec<u32> = self
            .attached
            .borrow()
            .iter()
            .filter(|(p, _)| *p == program)
            .map(|(_, s)| *s)
            .collect();
        let all_compiled = stages.iter().all(|id| self.shader_compile_status(*id));
        if stages.len() >= 2 && all_compiled && !self.fail_link.get() {
            self.linked_ok.borrow_mut().push(program);
        }
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.linked_ok.borrow().contains(&program)
    }

    fn program_info_log(&self, program: u32) -> String {
        if self.program_link_status(program) {
            return String::new();
        }
        self.log_or("error: linking with uncompiled/unattached shader".to_string())
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.alloc();
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn create_buffer(&self) -> Result<u32, String> {
        if self.fail_buffer_alloc.get() {
            return Err("out of memory".to_string());
        }
        let id = self.alloc();
        self.record(Call::CreateBuffer(id));
        Ok(id)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData {
            target,
            bytes: data.to_vec(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays { mode, first, count });
    }
}
