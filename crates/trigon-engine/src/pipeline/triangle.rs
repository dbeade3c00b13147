use std::fmt;
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};

use crate::config::ShaderFailurePolicy;
use crate::error::PipelineFailure;
use crate::gl::GlApi;

use super::shader::{ShaderDiagnostic, ShaderStage, compile_stage, link_program};

pub const VERTEX_SHADER_SRC: &str = include_str!("shaders/triangle.vert");
pub const FRAGMENT_SHADER_SRC: &str = include_str!("shaders/triangle.frag");

/// One vertex position in clip space.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
}

impl Vertex {
    pub const LAYOUT: VertexLayout = VertexLayout {
        location: 0,
        components: 3,
        stride: std::mem::size_of::<Vertex>() as i32,
        offset: 0,
        normalized: false,
    };
}

/// How attribute `location` is read out of the vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    pub location: u32,
    /// `f32` components per vertex.
    pub components: i32,
    /// Bytes between consecutive vertices.
    pub stride: i32,
    /// Byte offset of the first component.
    pub offset: i32,
    pub normalized: bool,
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex { pos: [-0.5, -0.5, 0.0] },
    Vertex { pos: [0.5, -0.5, 0.0] },
    Vertex { pos: [0.0, 0.5, 0.0] },
];

/// The linked program plus the static triangle it draws.
///
/// Built once before the render loop. Identifiers never change afterwards and
/// every GL object is deleted on drop, so the context must still be current
/// when this value goes away.
pub struct TrianglePipeline<G: GlApi> {
    gl: Rc<G>,
    program: G::Program,
    vertex_array: G::VertexArray,
    buffer: G::Buffer,
}

impl<G: GlApi> TrianglePipeline<G> {
    /// Compiles the embedded shaders, links them and uploads [`TRIANGLE`].
    ///
    /// Compile or link failures come back as [`PipelineError::Shader`], which
    /// still owns a complete pipeline; see [`PipelineError::resolve`].
    pub fn build(gl: Rc<G>) -> Result<Self, PipelineError<G>> {
        Self::build_from_sources(gl, VERTEX_SHADER_SRC, FRAGMENT_SHADER_SRC)
    }

    pub(crate) fn build_from_sources(
        gl: Rc<G>,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, PipelineError<G>> {
        let program = gl.create_program().map_err(PipelineError::Allocation)?;
        let vertex_array = gl.create_vertex_array().map_err(|e| {
            gl.delete_program(program);
            PipelineError::Allocation(e)
        })?;
        let buffer = gl.create_buffer().map_err(|e| {
            gl.delete_vertex_array(vertex_array);
            gl.delete_program(program);
            PipelineError::Allocation(e)
        })?;

        let pipeline = Self {
            gl,
            program,
            vertex_array,
            buffer,
        };

        let diagnostics = pipeline.compile_and_link(vertex_src, fragment_src);
        pipeline.upload_vertices();

        if diagnostics.is_empty() {
            log::info!("shader pipeline ready");
            Ok(pipeline)
        } else {
            Err(PipelineError::Shader {
                diagnostics,
                pipeline,
            })
        }
    }

    fn compile_and_link(&self, vertex_src: &str, fragment_src: &str) -> Vec<ShaderDiagnostic> {
        let gl = &*self.gl;
        let mut diagnostics = Vec::new();
        let mut stages = Vec::with_capacity(2);

        for (stage, src) in [
            (ShaderStage::Vertex, vertex_src),
            (ShaderStage::Fragment, fragment_src),
        ] {
            match compile_stage(gl, stage, src) {
                Ok(shader) => stages.push(shader),
                Err(d) => diagnostics.push(d),
            }
        }

        // Linking still runs with a missing stage; the driver reports it.
        if let Err(d) = link_program(gl, self.program, &stages) {
            diagnostics.push(d);
        }

        // The program keeps the compiled output.
        for shader in stages {
            gl.delete_shader(shader);
        }

        diagnostics
    }

    fn upload_vertices(&self) {
        let gl = &*self.gl;
        let layout = Vertex::LAYOUT;

        gl.bind_vertex_array(Some(self.vertex_array));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer));
        gl.buffer_data(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&TRIANGLE),
            glow::STATIC_DRAW,
        );
        gl.vertex_attrib_pointer_f32(
            layout.location,
            layout.components,
            glow::FLOAT,
            layout.normalized,
            layout.stride,
            layout.offset,
        );
        gl.enable_vertex_attrib_array(layout.location);

        // The vertex array keeps the attribute binding.
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        gl.bind_vertex_array(None);
    }

    /// Binds the program and vertex array and draws the three vertices.
    pub fn draw(&self) {
        let gl = &*self.gl;
        gl.use_program(Some(self.program));
        gl.bind_vertex_array(Some(self.vertex_array));
        gl.draw_arrays(glow::TRIANGLES, 0, TRIANGLE.len() as i32);
    }

    pub fn program(&self) -> G::Program {
        self.program
    }

    pub fn vertex_array(&self) -> G::VertexArray {
        self.vertex_array
    }

    pub fn buffer(&self) -> G::Buffer {
        self.buffer
    }
}

impl<G: GlApi> fmt::Debug for TrianglePipeline<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrianglePipeline")
            .field("program", &self.program)
            .field("vertex_array", &self.vertex_array)
            .field("buffer", &self.buffer)
            .finish()
    }
}

impl<G: GlApi> Drop for TrianglePipeline<G> {
    fn drop(&mut self) {
        let gl = &*self.gl;
        gl.delete_buffer(self.buffer);
        gl.delete_vertex_array(self.vertex_array);
        gl.delete_program(self.program);
        log::debug!("shader pipeline released");
    }
}

/// Failure while building a [`TrianglePipeline`].
pub enum PipelineError<G: GlApi> {
    /// A stage failed to compile or the program failed to link.
    ///
    /// `pipeline` is fully constructed but its program may be unusable.
    Shader {
        diagnostics: Vec<ShaderDiagnostic>,
        pipeline: TrianglePipeline<G>,
    },
    /// GL refused to create an object; nothing was left allocated.
    Allocation(String),
}

impl<G: GlApi> PipelineError<G> {
    pub fn diagnostics(&self) -> &[ShaderDiagnostic] {
        match self {
            PipelineError::Shader { diagnostics, .. } => diagnostics,
            PipelineError::Allocation(_) => &[],
        }
    }

    /// Takes the pipeline back, ignoring the diagnostics.
    ///
    /// Returns `Err(self)` for allocation failures, which have no pipeline.
    pub fn recover(self) -> Result<TrianglePipeline<G>, Self> {
        match self {
            PipelineError::Shader { pipeline, .. } => Ok(pipeline),
            other => Err(other),
        }
    }

    /// Applies `policy`: `Continue` keeps rendering with the pipeline as built,
    /// `Halt` releases it and returns a fatal error.
    pub fn resolve(
        self,
        policy: ShaderFailurePolicy,
    ) -> Result<TrianglePipeline<G>, PipelineFailure> {
        match (self, policy) {
            (PipelineError::Allocation(msg), _) => Err(PipelineFailure::Allocation(msg)),
            (PipelineError::Shader { pipeline, diagnostics }, ShaderFailurePolicy::Continue) => {
                log::warn!(
                    "continuing with a shader pipeline that reported {} diagnostic(s)",
                    diagnostics.len()
                );
                Ok(pipeline)
            }
            (PipelineError::Shader { diagnostics, .. }, ShaderFailurePolicy::Halt) => {
                Err(PipelineFailure::Rejected(diagnostics))
            }
        }
    }
}

impl<G: GlApi> fmt::Debug for PipelineError<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Shader { diagnostics, pipeline } => f
                .debug_struct("Shader")
                .field("diagnostics", diagnostics)
                .field("pipeline", pipeline)
                .finish(),
            PipelineError::Allocation(msg) => f.debug_tuple("Allocation").field(msg).finish(),
        }
    }
}

impl<G: GlApi> fmt::Display for PipelineError<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Shader { diagnostics, .. } => {
                write!(f, "shader pipeline reported {} diagnostic(s)", diagnostics.len())?;
                for d in diagnostics {
                    write!(f, "; {d}")?;
                }
                Ok(())
            }
            PipelineError::Allocation(msg) => write!(f, "failed to allocate GL object: {msg}"),
        }
    }
}

impl<G: GlApi> std::error::Error for PipelineError<G> {}
